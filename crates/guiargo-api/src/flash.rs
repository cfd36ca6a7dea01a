//! One-shot flash messages carried across a redirect in a short-lived cookie

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use guiargo_shared::constants::{FLASH_COOKIE, FLASH_MAX_AGE_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn encode(&self) -> Option<String> {
        serde_json::to_vec(self).ok().map(|json| URL_SAFE_NO_PAD.encode(json))
    }

    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

pub fn set(cookies: &Cookies, kind: FlashKind, message: impl Into<String>) {
    let flash = Flash { kind, message: message.into() };
    let Some(value) = flash.encode() else {
        return;
    };
    cookies.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(FLASH_MAX_AGE_SECONDS))
            .build(),
    );
}

pub fn success(cookies: &Cookies, message: impl Into<String>) {
    set(cookies, FlashKind::Success, message);
}

pub fn error(cookies: &Cookies, message: impl Into<String>) {
    set(cookies, FlashKind::Error, message);
}

/// Reads and removes the pending flash.
pub fn take(cookies: &Cookies) -> Option<Flash> {
    let value = cookies.get(FLASH_COOKIE)?.value().to_string();
    cookies.remove(Cookie::build(FLASH_COOKIE).path("/").build());

    let flash = Flash::decode(&value);
    if flash.is_none() {
        debug!("Discarding unreadable flash cookie");
    }
    flash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_survives_cookie_encoding() {
        let flash = Flash {
            kind: FlashKind::Error,
            message: "No tienes permisos para realizar esta acción".into(),
        };
        let encoded = flash.encode().unwrap();
        assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(Flash::decode(&encoded), Some(flash));
    }

    #[test]
    fn test_garbage_is_ignored() {
        assert_eq!(Flash::decode("%%%"), None);
        assert_eq!(Flash::decode(&URL_SAFE_NO_PAD.encode("{}")), None);
    }
}
