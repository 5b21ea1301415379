use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

#[macro_use]
pub mod macros;
pub mod clipboard;
pub mod components;
pub mod constants;
pub mod diagnostics;
pub mod dom_utils;
pub mod error;
pub mod models;
pub mod network;
pub mod state;
pub mod storage;
pub mod user;

use components::admin_tabs;
use components::InvitationSettings;
use constants::{ID_LOGIN_FORM, LOGIN_PAGE};
use state::Session;

// Main entry point for the WASM application.  The same bundle serves the
// login page and the admin page; which one we are on is read off the markup.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let document = dom_utils::document()?;

    if document.get_element_by_id(ID_LOGIN_FORM).is_some() {
        components::login::mount(&document)?;
    }

    if document
        .get_element_by_id(&admin_tabs::tab_id(admin_tabs::DEFAULT_TAB))
        .is_some()
    {
        start_admin(&document)?;
    }

    Ok(())
}

fn start_admin(document: &Document) -> Result<(), JsValue> {
    admin_tabs::mount(document)?;

    let Some(session) = Session::restore() else {
        // No token or an expired one
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
        return window.location().set_href(LOGIN_PAGE);
    };
    let session = Rc::new(session);
    let invitations = InvitationSettings::new(Rc::clone(&session), document.clone());

    spawn_local(async move {
        session.load_user().await;
        if let Some(user) = session.user() {
            debug_log!("Signed in as {} ({})", user.display_name, user.id);
        }
        if let Err(e) = invitations.load().await {
            diagnostics::error(&format!("Failed to load invitations: {:?}", e));
        }
    });

    Ok(())
}
