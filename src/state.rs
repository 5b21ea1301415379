//! The logged-in session.  `start_admin` builds it once and hands an
//! `Rc<Session>` to every widget on the admin page.

use std::cell::RefCell;

use crate::constants::{STORAGE_JWT_TOKEN, STORAGE_LAST_HOST};
use crate::models::User;
use crate::network::{ApiConfig, Fetcher};
use crate::storage;
use crate::user;

pub struct Session {
    fetcher: Fetcher,
    config: ApiConfig,
    user: RefCell<Option<User>>,
}

impl Session {
    pub fn new(token: &str, config: ApiConfig) -> Self {
        Self {
            fetcher: Fetcher::new(token, config.core_url(), config.media_url()),
            config,
            user: RefCell::new(None),
        }
    }

    /// Rebuild the session from the stored token and the host the user last
    /// logged into.  `None` means the user has to log in again.
    pub fn restore() -> Option<Self> {
        let token = storage::get_item(STORAGE_JWT_TOKEN)?;
        let config = match storage::get_item(STORAGE_LAST_HOST) {
            Some(host) => ApiConfig::from_core_url(&host),
            None => ApiConfig::new().unwrap_or_default(),
        };
        Some(Self::new(&token, config))
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn core_url(&self) -> &str {
        self.config.core_url()
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Refresh the cached profile.  A failed request keeps the previous one.
    pub async fn load_user(&self) {
        if let Some(profile) = user::load_current_user(&self.fetcher).await {
            *self.user.borrow_mut() = Some(profile);
        }
    }
}
