//! Bindings for the SweetAlert2 dialogs (`Swal.fire`) the pages load from a
//! `<script>` tag.
//!
//! Every dialog shares the same look: no animation, no dismiss on outside
//! click, and the `swal*` CSS classes.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::diagnostics;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Swal, js_name = fire)]
    fn swal_fire(options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomClass {
    pub title: &'static str,
    pub popup: &'static str,
    pub cancel_button: &'static str,
    pub confirm_button: &'static str,
}

impl CustomClass {
    pub fn standard() -> Self {
        Self {
            title: "swalTitle",
            popup: "swalPopup",
            cancel_button: "swalCancel",
            confirm_button: "swalConfirm",
        }
    }

    /// Destructive confirmations: the confirm button gets the muted style
    /// and cancel the highlighted one.
    pub fn swapped() -> Self {
        Self {
            cancel_button: "swalConfirm",
            confirm_button: "swalCancel",
            ..Self::standard()
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum DialogIcon {
    Error,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DialogOptions {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<DialogIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub animation: bool,
    pub custom_class: CustomClass,
    pub show_cancel_button: bool,
    pub focus_cancel: bool,
    pub focus_confirm: bool,
    pub confirm_button_text: String,
    pub allow_outside_click: bool,
}

impl DialogOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            html: None,
            text: None,
            animation: false,
            custom_class: CustomClass::standard(),
            show_cancel_button: false,
            focus_cancel: false,
            focus_confirm: true,
            confirm_button_text: "OK".to_string(),
            allow_outside_click: false,
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            icon: Some(DialogIcon::Error),
            text: Some(detail.into()),
            focus_confirm: false,
            ..Self::new(title)
        }
    }

    /// Confirmation for an irreversible action; cancel has the focus.
    pub fn destructive(title: impl Into<String>, confirm_text: &str) -> Self {
        Self {
            custom_class: CustomClass::swapped(),
            show_cancel_button: true,
            focus_cancel: true,
            focus_confirm: false,
            confirm_button_text: confirm_text.to_string(),
            ..Self::new(title)
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// How the user closed the dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogResult {
    /// `result.value` was truthy.
    pub confirmed: bool,
    /// `result.value` when it is a string (what `preConfirm` returned).
    pub value: Option<String>,
}

/// Show a dialog and wait for it to close.  `pre_confirm` runs when the
/// confirm button is pressed, while the popup DOM still exists; whatever it
/// returns becomes [`DialogResult::value`].
pub async fn fire(options: &DialogOptions, pre_confirm: Option<&js_sys::Function>) -> Result<DialogResult, JsValue> {
    let js_options = serde_wasm_bindgen::to_value(options)?;
    if let Some(callback) = pre_confirm {
        js_sys::Reflect::set(&js_options, &JsValue::from_str("preConfirm"), callback)?;
    }

    let result = JsFuture::from(swal_fire(&js_options)?).await?;
    let value = js_sys::Reflect::get(&result, &JsValue::from_str("value"))?;
    Ok(DialogResult {
        confirmed: value.is_truthy(),
        value: value.as_string(),
    })
}

/// Fire-and-forget error popup.
pub fn show_error(title: &str, detail: &str) {
    let options = DialogOptions::error(title, detail);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = fire(&options, None).await {
            diagnostics::warn(&format!("Failed to show dialog: {:?}", e));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_serialise_with_swal_field_names() {
        let value = serde_json::to_value(DialogOptions::new("New invitation")).unwrap();
        assert_eq!(value["title"], json!("New invitation"));
        assert_eq!(value["animation"], json!(false));
        assert_eq!(value["allowOutsideClick"], json!(false));
        assert_eq!(value["confirmButtonText"], json!("OK"));
        assert_eq!(value["customClass"]["confirmButton"], json!("swalConfirm"));
        assert!(value.get("icon").is_none());
        assert!(value.get("html").is_none());
    }

    #[test]
    fn destructive_dialog_swaps_button_classes() {
        let opts = DialogOptions::destructive("Delete invitation 'x'", "Delete");
        assert!(opts.show_cancel_button);
        assert!(opts.focus_cancel);
        assert_eq!(opts.custom_class.confirm_button, "swalCancel");
        assert_eq!(opts.custom_class.cancel_button, "swalConfirm");
        assert_eq!(opts.custom_class.title, "swalTitle");
    }

    #[test]
    fn error_dialog_has_icon() {
        let value = serde_json::to_value(DialogOptions::error("Unable to login", "bad url")).unwrap();
        assert_eq!(value["icon"], json!("error"));
        assert_eq!(value["text"], json!("bad url"));
    }
}
