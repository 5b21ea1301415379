//! Copy text to the user's clipboard.
//!
//! Prefers `navigator.clipboard.writeText()`; pages served over plain HTTP do
//! not expose it, so there is a fallback through a temporary `<input>` and
//! `document.execCommand("copy")`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlInputElement, Window};

use crate::constants::ID_COPY_INPUT;
use crate::diagnostics;
use crate::error::FetchError;

/// Never fails; problems are logged to the console.
pub async fn copy_to_clipboard(text: &str) {
    if let Err(e) = try_copy(text).await {
        diagnostics::error(&format!("copyToClipboard: Failed to copy: {}", FetchError::describe(&e)));
    }
}

async fn try_copy(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;

    // Looked up by reflection: the typed binding is behind web-sys unstable APIs.
    let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return fallback_copy(&window, text);
    }

    let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write_text.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn fallback_copy(window: &Window, text: &str) -> Result<(), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("no document on window"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("<body> element missing"))?;

    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_id(ID_COPY_INPUT);
    input.set_value(text);
    body.append_child(&input)?;
    input.select();

    let html_document: HtmlDocument = document.dyn_into()?;
    let copied = html_document.exec_command("copy");
    input.remove();

    match copied {
        Ok(true) => Ok(()),
        Ok(false) => Err(JsValue::from_str("execCommand(\"copy\") was rejected")),
        Err(e) => Err(e),
    }
}
