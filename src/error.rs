//! Error taxonomy for network and storage operations.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Network unreachable, DNS failure, CORS rejection or a manual abort.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The request could not be assembled (bad header value, bad body).
    #[error("could not build request: {0}")]
    Request(String),

    #[error("no global window exists")]
    NoWindow,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl FetchError {
    /// Render a JS exception (usually a `TypeError` or `DOMException`) into
    /// something readable.
    pub fn describe(value: &JsValue) -> String {
        value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::InvalidJson(e.to_string())
    }
}

impl From<FetchError> for JsValue {
    fn from(e: FetchError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
