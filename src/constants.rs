// Network defaults
pub const FETCH_TIMEOUT_MS: u32 = 5_000;
pub const CORE_API_PREFIX: &str = "/api";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const DEFAULT_METHOD: &str = "GET";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Persistent storage keys
pub const STORAGE_JWT_TOKEN: &str = "jwtToken";
pub const STORAGE_LAST_HOST: &str = "lastHost";
pub const STORAGE_LAST_USERNAME: &str = "lastUsername";
pub const JWT_TOKEN_TTL_DAYS: i64 = 1; // session token lives one day

// Pages
pub const APP_PAGE: &str = "app.html";
pub const LOGIN_PAGE: &str = "index.html";

// Hosted origins that serve their own backend
pub const KNOWN_ORIGINS: [&str; 2] = ["https://dev.revoicechat.fr", "https://app.revoicechat.fr"];

// DOM ids
pub const ID_LOGIN_FORM: &str = "login-form";
pub const ID_INVITATION_LIST: &str = "server-setting-invitation";
pub const ID_INVITATION_CREATE: &str = "server-setting-invitation-create";
pub const ID_INVITATION_CATEGORY: &str = "modal-invitation-category";
pub const ID_COPY_INPUT: &str = "input-copy";
pub const TAB_ID_PREFIX: &str = "server-setting-tab-";
pub const TAB_CONTENT_ID_PREFIX: &str = "server-setting-content-";

// CSS classes
pub const CSS_ACTIVE: &str = "active";
pub const CSS_HIDDEN: &str = "hidden";
