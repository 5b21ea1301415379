//! Login page: pre-fill the form, exchange credentials for a token and move
//! on to the application page.

use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlFormElement, HtmlInputElement, KeyboardEvent};

use super::dialog;
use crate::constants::{
    APP_PAGE, ID_LOGIN_FORM, JWT_TOKEN_TTL_DAYS, KNOWN_ORIGINS, STORAGE_JWT_TOKEN, STORAGE_LAST_HOST,
    STORAGE_LAST_USERNAME,
};
use crate::error::FetchError;
use crate::models::LoginCredentials;
use crate::network::auth;
use crate::network::{BrowserTransport, Transport, TransportResponse};
use crate::{diagnostics, dom_utils, storage};

/// Host pre-filled in the form.  The hosted deployments serve their own
/// backend; anywhere else the last host used wins.
pub fn auto_host(page_origin: &str, last_host: Option<String>) -> Option<String> {
    if KNOWN_ORIGINS.contains(&page_origin) {
        Some(page_origin.to_string())
    } else {
        last_host
    }
}

fn form_field(form: &HtmlFormElement, name: &str) -> Result<HtmlInputElement, JsValue> {
    form.query_selector(&format!("[name='{}']", name))?
        .ok_or_else(|| JsValue::from_str(&format!("login form has no '{}' field", name)))?
        .dyn_into::<HtmlInputElement>()
        .map_err(JsValue::from)
}

fn login_form(document: &Document) -> Result<HtmlFormElement, JsValue> {
    dom_utils::element_by_id(document, ID_LOGIN_FORM)?
        .dyn_into::<HtmlFormElement>()
        .map_err(JsValue::from)
}

/// Pre-fill host and username, and submit on Enter.
pub fn mount(document: &Document) -> Result<(), JsValue> {
    let form = login_form(document)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;

    let origin = window.location().origin()?;
    if let Some(host) = auto_host(&origin, storage::get_item(STORAGE_LAST_HOST)) {
        form_field(&form, "host")?.set_value(&host);
    }
    if let Some(username) = storage::get_item(STORAGE_LAST_USERNAME) {
        form_field(&form, "username")?.set_value(&username);
    }

    let submit_form = form.clone();
    let on_keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() != "Enter" {
            return;
        }
        e.prevent_default();
        let form = submit_form.clone();
        spawn_local(async move {
            if let Err(e) = submit(&form).await {
                diagnostics::error(&format!("login: {:?}", e));
            }
        });
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();
    Ok(())
}

/// Read the form, log in, and go to the application page on success.
/// Problems are reported to the user with a dialog.
pub async fn submit(form: &HtmlFormElement) -> Result<(), JsValue> {
    let credentials = LoginCredentials {
        username: form_field(form, "username")?.value(),
        password: form_field(form, "password")?.value(),
    };

    let origin = match auth::host_origin(&form_field(form, "host")?.value()) {
        Ok(origin) => origin,
        Err(e) => {
            dialog::show_error("Unable to login", &e.to_string());
            return Ok(());
        }
    };

    match log_in(&origin, &credentials).await {
        Ok(()) => {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
            window.location().set_href(APP_PAGE)
        }
        Err(e) => {
            diagnostics::error(&format!("login: {}", e));
            dialog::show_error(&format!("Unable to connect to\n {}", origin), &e.to_string());
            Ok(())
        }
    }
}

async fn log_in(origin: &str, credentials: &LoginCredentials) -> Result<(), FetchError> {
    store_login(&BrowserTransport::default(), origin, credentials).await
}

/// Host and username are remembered as soon as the server accepts the
/// credentials, even if reading the token fails afterwards.
async fn store_login<T: Transport>(
    transport: &T,
    origin: &str,
    credentials: &LoginCredentials,
) -> Result<(), FetchError> {
    let accepted = auth::authenticate(transport, origin, credentials).await?;
    storage::set_item(STORAGE_LAST_HOST, origin, None)?;
    storage::set_item(STORAGE_LAST_USERNAME, &credentials.username, None)?;
    let token = accepted.text().await?;
    storage::set_item(STORAGE_JWT_TOKEN, &token, Some(JWT_TOKEN_TTL_DAYS))?;
    Ok(())
}
