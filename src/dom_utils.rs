//! dom_utils.rs – thin helper layer for repetitive DOM operations.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::constants::{CSS_ACTIVE, CSS_HIDDEN};

/// The page's `document`.
pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

/// Look up an element that the page markup is expected to contain.
pub fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) -> Result<(), JsValue> {
    el.class_list().remove_1(CSS_HIDDEN)
}

pub fn hide(el: &Element) -> Result<(), JsValue> {
    el.class_list().add_1(CSS_HIDDEN)
}

/// Add the `active` modifier to a tab button.
pub fn set_active(btn: &Element) -> Result<(), JsValue> {
    btn.class_list().add_1(CSS_ACTIVE)
}

pub fn set_inactive(btn: &Element) -> Result<(), JsValue> {
    btn.class_list().remove_1(CSS_ACTIVE)
}
