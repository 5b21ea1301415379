//! The seam between request building and `window.fetch`.
//!
//! [`Fetcher`](super::fetcher::Fetcher) only ever sees [`Transport`] and
//! [`TransportResponse`]; the browser implementation lives in
//! [`BrowserTransport`].  Unit tests plug an in-memory transport in instead.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestCache, RequestInit, RequestMode, Response};

use crate::constants::{CONTENT_TYPE_JSON, FETCH_TIMEOUT_MS};
use crate::error::FetchError;

/// Opaque media payload, forwarded to `fetch` untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Text(String),
    Bytes(Vec<u8>),
    /// Anything the page hands over directly: `FormData`, `Blob`, `File`.
    Js(JsValue),
}

impl RawBody {
    fn to_js(&self) -> JsValue {
        match self {
            RawBody::Text(text) => JsValue::from_str(text),
            RawBody::Bytes(bytes) => js_sys::Uint8Array::from(bytes.as_slice()).into(),
            RawBody::Js(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Already serialised JSON text.
    Json(String),
    Raw(RawBody),
}

/// Everything needed to issue one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bypass the browser HTTP cache entirely.
    pub no_store: bool,
}

impl OutgoingRequest {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            no_store: false,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response whose body has not been read yet.
#[allow(async_fn_in_trait)]
pub trait TransportResponse: Sized {
    /// `true` for a 2xx status.
    fn ok(&self) -> bool;
    fn status(&self) -> u16;
    fn content_type(&self) -> Option<String>;
    async fn text(self) -> Result<String, FetchError>;

    async fn json(self) -> Result<serde_json::Value, FetchError> {
        let text = self.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    type Response: TransportResponse;

    /// Send the request.  Resolves once response headers are in; transport
    /// failures (network, abort, timeout) come back as `Err`.
    async fn send(&self, request: OutgoingRequest) -> Result<Self::Response, FetchError>;
}

/// Whether a `Content-Type` header value denotes a JSON document.
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(CONTENT_TYPE_JSON)
}

// ---------------------------------------------------------------------------
// Browser implementation
// ---------------------------------------------------------------------------

/// `window.fetch` with CORS mode and an abort timer.
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    timeout_ms: u32,
}

impl Default for BrowserTransport {
    fn default() -> Self {
        Self::with_timeout(FETCH_TIMEOUT_MS)
    }
}

impl BrowserTransport {
    /// Abort requests that have not completed within `timeout_ms`.
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

/// Keeps the abort timer armed until the body has been consumed.
pub struct BrowserResponse {
    inner: Response,
    timed_out: Rc<Cell<bool>>,
    timeout_ms: u32,
    _timer: Timeout,
}

fn build_error(e: JsValue) -> FetchError {
    FetchError::Request(FetchError::describe(&e))
}

impl Transport for BrowserTransport {
    type Response = BrowserResponse;

    async fn send(&self, request: OutgoingRequest) -> Result<BrowserResponse, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;

        let opts = RequestInit::new();
        opts.set_method(&request.method);
        opts.set_mode(RequestMode::Cors);
        if request.no_store {
            opts.set_cache(RequestCache::NoStore);
        }

        let headers = Headers::new().map_err(build_error)?;
        for (name, value) in &request.headers {
            headers.append(name, value).map_err(build_error)?;
        }
        opts.set_headers(&headers);

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(text) => opts.set_body(&JsValue::from_str(text)),
            RequestBody::Raw(raw) => opts.set_body(&raw.to_js()),
        }

        let controller = AbortController::new().map_err(build_error)?;
        opts.set_signal(Some(&controller.signal()));

        let js_request = Request::new_with_str_and_init(&request.url, &opts).map_err(build_error)?;

        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let timed_out = Rc::clone(&timed_out);
            Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| transport_error(&e, timed_out.get(), self.timeout_ms))?;
        let inner: Response = value
            .dyn_into()
            .map_err(|_| FetchError::Network("fetch did not resolve to a Response".into()))?;

        Ok(BrowserResponse {
            inner,
            timed_out,
            timeout_ms: self.timeout_ms,
            _timer: timer,
        })
    }
}

fn transport_error(e: &JsValue, timed_out: bool, timeout_ms: u32) -> FetchError {
    if timed_out {
        FetchError::Timeout(timeout_ms)
    } else {
        FetchError::Network(FetchError::describe(e))
    }
}

impl TransportResponse for BrowserResponse {
    fn ok(&self) -> bool {
        self.inner.ok()
    }

    fn status(&self) -> u16 {
        self.inner.status()
    }

    fn content_type(&self) -> Option<String> {
        self.inner.headers().get("content-type").ok().flatten()
    }

    async fn text(self) -> Result<String, FetchError> {
        let promise = self.inner.text().map_err(build_error)?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| transport_error(&e, self.timed_out.get(), self.timeout_ms))?;
        Ok(text.as_string().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("image/jpeg"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = OutgoingRequest::new("https://x/api/a", "GET").with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("Content-Type"), None);
    }

    #[test]
    fn browser_transport_aborts_after_five_seconds() {
        assert_eq!(BrowserTransport::default().timeout_ms(), 5000);
        assert_eq!(BrowserTransport::with_timeout(50).timeout_ms(), 50);
    }

    #[test]
    fn aborted_request_maps_to_timeout() {
        assert_eq!(transport_error(&JsValue::NULL, true, 5000), FetchError::Timeout(5000));
        assert_eq!(transport_error(&JsValue::NULL, true, 10), FetchError::Timeout(10));
    }

    #[test]
    fn builder_defaults() {
        let req = OutgoingRequest::new("u", "POST");
        assert_eq!(req.body, RequestBody::Empty);
        assert!(!req.no_store);
        assert!(req.no_store().no_store);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::diagnostics;
    use crate::network::Fetcher;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn slow_request_is_aborted_and_absorbed() {
        let _ = diagnostics::take_captured_errors();
        // Non-routable address: the connection attempt hangs until aborted.
        let fetcher = Fetcher::with_transport(
            "tok",
            "http://10.255.255.1",
            "http://10.255.255.1/media",
            BrowserTransport::with_timeout(10),
        );

        assert_eq!(fetcher.fetch_core("/users", None, None).await, None);

        let logged = diagnostics::take_captured_errors();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].starts_with("fetchCore: An error occurred"));
    }
}
