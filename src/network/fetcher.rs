//! Authenticated access to the core and media APIs.
//!
//! Every call is a single request/response round trip: no retry, no cache,
//! no state kept between calls.  Failures never escape a [`Fetcher`]
//! method; they are logged and reported as `None`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::JsValue;

use super::transport::{
    is_json_content_type, BrowserTransport, OutgoingRequest, RawBody, RequestBody, Transport,
    TransportResponse,
};
use crate::constants::{CONTENT_TYPE_JSON, CORE_API_PREFIX, DEFAULT_METHOD};
use crate::diagnostics;
use crate::error::FetchError;

/// Normalised result of a successful round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Parsed body of a JSON response.
    Json(Value),
    /// Whether the status was 2xx.  Returned for `DELETE` and for any
    /// response that is not JSON.
    Status(bool),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            FetchOutcome::Json(_) => true,
            FetchOutcome::Status(ok) => *ok,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FetchOutcome::Json(value) => Some(value),
            FetchOutcome::Status(_) => None,
        }
    }

    /// Deserialize a JSON outcome into `T`.  `None` for status outcomes or
    /// when the JSON does not have the expected shape.
    pub fn into_typed<T: DeserializeOwned>(self) -> Option<T> {
        match self {
            FetchOutcome::Json(value) => serde_json::from_value(value).ok(),
            FetchOutcome::Status(_) => None,
        }
    }

    /// Convert into the plain JS value a script would expect: the JSON value
    /// itself or a boolean.
    pub fn to_js(&self) -> Result<JsValue, serde_wasm_bindgen::Error> {
        use serde::Serialize;
        match self {
            FetchOutcome::Json(value) => {
                value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            }
            FetchOutcome::Status(ok) => Ok(JsValue::from_bool(*ok)),
        }
    }
}

/// Which backend a request targets.  Also provides the log label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    Core,
    Media,
}

impl Api {
    pub fn label(self) -> &'static str {
        match self {
            Api::Core => "fetchCore",
            Api::Media => "fetchMedia",
        }
    }
}

/// HTTP method actually sent: `GET` when none (or an empty one) is given.
pub fn effective_method(method: Option<&str>) -> String {
    match method.map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_uppercase(),
        _ => DEFAULT_METHOD.to_string(),
    }
}

/// Token and base URLs for one logged-in session.  Immutable; a re-login
/// builds a new one.
pub struct Fetcher<T: Transport = BrowserTransport> {
    token: String,
    core_url: String,
    media_url: String,
    transport: T,
}

impl Fetcher<BrowserTransport> {
    pub fn new(token: &str, core_url: &str, media_url: &str) -> Self {
        Self::with_transport(token, core_url, media_url, BrowserTransport::default())
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(token: &str, core_url: &str, media_url: &str, transport: T) -> Self {
        Self {
            token: token.to_string(),
            core_url: core_url.to_string(),
            media_url: media_url.to_string(),
            transport,
        }
    }

    pub fn core_url(&self) -> &str {
        &self.core_url
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Request for `<core>/api<path>` with a JSON body.  A `null` value is
    /// sent as no body at all.
    pub fn core_request(&self, path: &str, method: Option<&str>, data: Option<&Value>) -> OutgoingRequest {
        let body = match data {
            Some(Value::Null) | None => RequestBody::Empty,
            Some(value) => RequestBody::Json(value.to_string()),
        };
        OutgoingRequest::new(
            format!("{}{}{}", self.core_url, CORE_API_PREFIX, path),
            effective_method(method),
        )
        .with_header("Content-Type", CONTENT_TYPE_JSON)
        .with_header("Authorization", &self.bearer())
        .with_body(body)
    }

    /// Request for `<media><path>` carrying `data` untouched.  No
    /// `Content-Type` is set so the browser can pick the multipart boundary.
    pub fn media_request(&self, path: &str, method: Option<&str>, data: Option<RawBody>) -> OutgoingRequest {
        let body = data.map(RequestBody::Raw).unwrap_or(RequestBody::Empty);
        OutgoingRequest::new(format!("{}{}", self.media_url, path), effective_method(method))
            .with_header("Authorization", &self.bearer())
            .with_body(body)
    }

    pub async fn fetch_core(&self, path: &str, method: Option<&str>, data: Option<&Value>) -> Option<FetchOutcome> {
        let request = self.core_request(path, method, data);
        self.execute(Api::Core, request).await
    }

    pub async fn fetch_media(&self, path: &str, method: Option<&str>, data: Option<RawBody>) -> Option<FetchOutcome> {
        let request = self.media_request(path, method, data);
        self.execute(Api::Media, request).await
    }

    async fn execute(&self, api: Api, request: OutgoingRequest) -> Option<FetchOutcome> {
        let method = request.method.clone();
        let result = match self.transport.send(request).await {
            Ok(response) => classify(&method, response).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                diagnostics::report_failure(api.label(), &e);
                None
            }
        }
    }
}

/// `DELETE` → status; JSON content type → parsed body; anything else →
/// status.
pub async fn classify<R: TransportResponse>(method: &str, response: R) -> Result<FetchOutcome, FetchError> {
    if method.eq_ignore_ascii_case("DELETE") {
        return Ok(FetchOutcome::Status(response.ok()));
    }
    match response.content_type() {
        Some(ct) if is_json_content_type(&ct) => Ok(FetchOutcome::Json(response.json().await?)),
        _ => Ok(FetchOutcome::Status(response.ok())),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory transport.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct MockResponse {
        pub status: u16,
        pub content_type: Option<String>,
        pub body: String,
        /// Reading the body fails with this error instead.
        pub body_error: Option<FetchError>,
    }

    impl MockResponse {
        pub fn json(status: u16, body: &str) -> Self {
            Self::typed(status, "application/json", body)
        }

        pub fn typed(status: u16, content_type: &str, body: &str) -> Self {
            Self { status, content_type: Some(content_type.into()), body: body.into(), body_error: None }
        }

        pub fn empty(status: u16) -> Self {
            Self { status, content_type: None, body: String::new(), body_error: None }
        }

        /// Headers arrive with `status`, then the body stream breaks.
        pub fn broken_body(status: u16, err: FetchError) -> Self {
            Self { body_error: Some(err), ..Self::empty(status) }
        }
    }

    impl TransportResponse for MockResponse {
        fn ok(&self) -> bool {
            (200..300).contains(&self.status)
        }

        fn status(&self) -> u16 {
            self.status
        }

        fn content_type(&self) -> Option<String> {
            self.content_type.clone()
        }

        async fn text(self) -> Result<String, FetchError> {
            match self.body_error {
                Some(err) => Err(err),
                None => Ok(self.body),
            }
        }
    }

    /// Replies with queued results in order and records every request.
    #[derive(Default)]
    pub struct MockTransport {
        pub sent: RefCell<Vec<OutgoingRequest>>,
        replies: RefCell<VecDeque<Result<MockResponse, FetchError>>>,
    }

    impl MockTransport {
        pub fn replying(replies: Vec<Result<MockResponse, FetchError>>) -> Self {
            Self { sent: RefCell::default(), replies: RefCell::new(replies.into()) }
        }

        pub fn last_request(&self) -> OutgoingRequest {
            self.sent.borrow().last().cloned().expect("no request was sent")
        }
    }

    impl Transport for MockTransport {
        type Response = MockResponse;

        async fn send(&self, request: OutgoingRequest) -> Result<MockResponse, FetchError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Network("no scripted reply".into())))
        }
    }
}
