//! Credential exchange against `<host>/api/auth/login`.

use url::Url;

use super::transport::{OutgoingRequest, RequestBody, Transport, TransportResponse};
use crate::constants::{CONTENT_TYPE_JSON, LOGIN_PATH};
use crate::error::FetchError;
use crate::models::LoginCredentials;

/// Validate what the user typed in the host field and reduce it to its
/// origin (`scheme://host[:port]`).
pub fn host_origin(input: &str) -> Result<String, FetchError> {
    let url = Url::parse(input.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(FetchError::InvalidUrl(format!("{} has no origin", input)));
    }
    Ok(origin.ascii_serialization())
}

pub fn login_request(origin: &str, credentials: &LoginCredentials) -> Result<OutgoingRequest, FetchError> {
    let body = serde_json::to_string(credentials)?;
    Ok(OutgoingRequest::new(format!("{}{}", origin, LOGIN_PATH), "POST")
        .with_header("Content-Type", CONTENT_TYPE_JSON)
        .with_body(RequestBody::Json(body))
        .no_store())
}

/// Send the credentials.  Resolves to the accepted response, whose body is
/// the bare JWT; a non-2xx status is an error.
pub async fn authenticate<T: Transport>(
    transport: &T,
    origin: &str,
    credentials: &LoginCredentials,
) -> Result<T::Response, FetchError> {
    let response = transport.send(login_request(origin, credentials)?).await?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response)
}

/// Exchange credentials for a JWT.
pub async fn login<T: Transport>(
    transport: &T,
    origin: &str,
    credentials: &LoginCredentials,
) -> Result<String, FetchError> {
    authenticate(transport, origin, credentials).await?.text().await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::network::fetcher::mock::{MockResponse, MockTransport};

    fn creds() -> LoginCredentials {
        LoginCredentials { username: "alice".into(), password: "s3cret".into() }
    }

    #[test]
    fn origin_strips_path_and_query() {
        assert_eq!(host_origin("https://dev.revoicechat.fr/app.html?x=1").unwrap(), "https://dev.revoicechat.fr");
        assert_eq!(host_origin(" http://localhost:8080/ ").unwrap(), "http://localhost:8080");
    }

    #[test]
    fn origin_rejects_garbage() {
        assert!(matches!(host_origin("not a url"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(host_origin("data:text/plain,hi"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn login_posts_json_without_cache() {
        let transport = MockTransport::replying(vec![Ok(MockResponse::typed(200, "text/plain", "jwt.token.value"))]);
        let token = block_on(login(&transport, "https://app.revoicechat.fr", &creds())).unwrap();
        assert_eq!(token, "jwt.token.value");

        let sent = transport.last_request();
        assert_eq!(sent.url, "https://app.revoicechat.fr/api/auth/login");
        assert_eq!(sent.method, "POST");
        assert!(sent.no_store);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(
            sent.body,
            RequestBody::Json(r#"{"username":"alice","password":"s3cret"}"#.to_string())
        );
    }

    #[test]
    fn login_rejects_non_success_status() {
        let transport = MockTransport::replying(vec![Ok(MockResponse::empty(401))]);
        let err = block_on(login(&transport, "https://app.revoicechat.fr", &creds())).unwrap_err();
        assert_eq!(err, FetchError::Status(401));
    }

    #[test]
    fn accepted_login_with_broken_body() {
        let transport = MockTransport::replying(vec![
            Ok(MockResponse::broken_body(200, FetchError::Network("reset".into()))),
            Ok(MockResponse::broken_body(200, FetchError::Network("reset".into()))),
        ]);
        let accepted = block_on(authenticate(&transport, "https://app.revoicechat.fr", &creds())).unwrap();
        assert_eq!(accepted.status(), 200);

        let err = block_on(login(&transport, "https://app.revoicechat.fr", &creds())).unwrap_err();
        assert_eq!(err, FetchError::Network("reset".into()));
    }
}
