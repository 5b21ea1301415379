pub mod auth;
pub mod config;
pub mod fetcher;
pub mod js_fetcher;
pub mod transport;

// Re-export commonly used items
pub use config::ApiConfig;
pub use fetcher::{Fetcher, FetchOutcome};
pub use transport::{BrowserTransport, OutgoingRequest, RawBody, RequestBody, Transport, TransportResponse};
