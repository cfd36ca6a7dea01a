//! Application-wide constants

pub const SESSION_COOKIE: &str = "guiargo_session";
pub const FLASH_COOKIE: &str = "guiargo_flash";
pub const FLASH_MAX_AGE_SECONDS: i64 = 60;
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 12;
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
