//! `Fetcher` exported to JavaScript for the page scripts that are not ported
//! yet.  Promises resolve to the parsed JSON value, a boolean, or `null`;
//! they never reject.

use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::fetcher::{Api, FetchOutcome, Fetcher};
use super::transport::RawBody;
use crate::diagnostics;
use crate::error::FetchError;

#[wasm_bindgen(js_name = Fetcher)]
pub struct JsFetcher {
    inner: Rc<Fetcher>,
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn outcome_to_js(api: Api, outcome: Option<FetchOutcome>) -> JsValue {
    match outcome.map(|o| o.to_js()) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            diagnostics::report_failure(api.label(), &FetchError::InvalidJson(e.to_string()));
            JsValue::NULL
        }
        None => JsValue::NULL,
    }
}

#[wasm_bindgen(js_class = Fetcher)]
impl JsFetcher {
    #[wasm_bindgen(constructor)]
    pub fn new(token: &str, core_url: &str, media_url: &str) -> JsFetcher {
        JsFetcher {
            inner: Rc::new(Fetcher::new(token, core_url, media_url)),
        }
    }

    #[wasm_bindgen(js_name = fetchCore)]
    pub fn fetch_core(&self, path: String, method: Option<String>, data: JsValue) -> js_sys::Promise {
        let fetcher = Rc::clone(&self.inner);
        future_to_promise(async move {
            let data = if is_absent(&data) {
                None
            } else {
                match serde_wasm_bindgen::from_value::<Value>(data) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        diagnostics::report_failure(Api::Core.label(), &FetchError::Request(e.to_string()));
                        return Ok(JsValue::NULL);
                    }
                }
            };
            let outcome = fetcher.fetch_core(&path, method.as_deref(), data.as_ref()).await;
            Ok(outcome_to_js(Api::Core, outcome))
        })
    }

    #[wasm_bindgen(js_name = fetchMedia)]
    pub fn fetch_media(&self, path: String, method: Option<String>, data: JsValue) -> js_sys::Promise {
        let fetcher = Rc::clone(&self.inner);
        future_to_promise(async move {
            let body = (!is_absent(&data)).then(|| RawBody::Js(data));
            let outcome = fetcher.fetch_media(&path, method.as_deref(), body).await;
            Ok(outcome_to_js(Api::Media, outcome))
        })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn outcomes_convert_to_plain_js() {
        assert_eq!(outcome_to_js(Api::Core, None), JsValue::NULL);
        assert_eq!(outcome_to_js(Api::Core, Some(FetchOutcome::Status(true))), JsValue::TRUE);

        let js = outcome_to_js(Api::Core, Some(FetchOutcome::Json(json!({"data": "test"}))));
        let data = js_sys::Reflect::get(&js, &JsValue::from_str("data")).unwrap();
        assert_eq!(data.as_string().as_deref(), Some("test"));
    }

    #[wasm_bindgen_test]
    async fn unreachable_host_resolves_to_null() {
        let fetcher = JsFetcher::new("tok", "http://127.0.0.1:9", "http://127.0.0.1:9");
        let result = wasm_bindgen_futures::JsFuture::from(fetcher.fetch_core("/users".into(), None, JsValue::UNDEFINED))
            .await
            .unwrap();
        assert!(result.is_null());
    }
}
