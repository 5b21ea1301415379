/// Base URLs of the two backends the front-end talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    core_url: String,
    media_url: String,
}

impl Default for ApiConfig {
    /// Points at a local development backend.  Only meant for unit tests and
    /// for pages opened without a stored host; production sessions are built
    /// with [`ApiConfig::from_urls`] or [`ApiConfig::from_core_url`] from the
    /// host the user logged into.
    fn default() -> Self {
        Self::from_core_url("http://localhost")
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from the `CORE_BASE_URL` / `MEDIA_BASE_URL`
    /// environment variables captured at build time.
    pub fn new() -> Result<Self, &'static str> {
        match (option_env!("CORE_BASE_URL"), option_env!("MEDIA_BASE_URL")) {
            (Some(core), Some(media)) => Ok(Self::from_urls(core, media)),
            (Some(core), None) => Ok(Self::from_core_url(core)),
            _ => Err("CORE_BASE_URL environment variable is not set"),
        }
    }

    /// Create a config from both base URLs.  Trailing slashes are dropped so
    /// paths can always start with `/`.
    pub fn from_urls(core_url: &str, media_url: &str) -> Self {
        Self {
            core_url: core_url.trim_end_matches('/').to_string(),
            media_url: media_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a config where the media API is mounted under `<core>/media`.
    pub fn from_core_url(core_url: &str) -> Self {
        let core = core_url.trim_end_matches('/');
        Self::from_urls(core, &format!("{}/media", core))
    }

    pub fn core_url(&self) -> &str {
        &self.core_url
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }
}
