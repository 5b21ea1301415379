pub mod admin_tabs;
pub mod dialog;
pub mod invitation;
pub mod login;

// Re-export commonly used items
pub use invitation::InvitationSettings;
