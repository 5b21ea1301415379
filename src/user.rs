use crate::models::User;
use crate::network::{Fetcher, Transport};

/// Fetch the profile of the token's owner.  `None` when the request failed
/// or the answer is not a profile.
pub async fn load_current_user<T: Transport>(fetcher: &Fetcher<T>) -> Option<User> {
    fetcher.fetch_core("/user/me", Some("GET"), None).await?.into_typed()
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::error::FetchError;
    use crate::network::fetcher::mock::{MockResponse, MockTransport};

    fn fetcher(reply: Result<MockResponse, FetchError>) -> Fetcher<MockTransport> {
        Fetcher::with_transport("tok", "https://core", "https://media", MockTransport::replying(vec![reply]))
    }

    #[test]
    fn loads_profile() {
        let f = fetcher(Ok(MockResponse::json(200, r#"{"id":"42","displayName":"Alice"}"#)));
        let user = block_on(load_current_user(&f)).unwrap();
        assert_eq!(user.display_name, "Alice");
    }

    #[test]
    fn failure_yields_none() {
        assert_eq!(block_on(load_current_user(&fetcher(Err(FetchError::Timeout(5000))))), None);
        assert_eq!(block_on(load_current_user(&fetcher(Ok(MockResponse::empty(401))))), None);
    }
}
