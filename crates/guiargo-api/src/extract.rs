//! Authentication extractors
//!
//! Both resolve the session cookie into an [`AuthContext`] on every request.
//! Pages redirect to the login form on failure; JSON endpoints answer 401.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use guiargo_core::AuthContext;
use guiargo_shared::constants::{LOGIN_PATH, SESSION_COOKIE};

use crate::error::ApiError;
use crate::handlers::found;
use crate::state::AppState;

/// Logged-in user for HTML pages
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

/// Logged-in user for JSON endpoints
#[derive(Debug, Clone)]
pub struct ApiUser(pub AuthContext);

async fn resolve(parts: &mut Parts, state: &AppState) -> Option<AuthContext> {
    let cookies = Cookies::from_request_parts(parts, state).await.ok()?;
    let token = cookies.get(SESSION_COOKIE)?.value().to_string();

    match state.auth.authenticate(&token).await {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            debug!("Discarding session cookie: {}", e);
            cookies.remove(Cookie::build(SESSION_COOKIE).path("/").build());
            None
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await
            .map(CurrentUser)
            .ok_or_else(|| found(LOGIN_PATH))
    }
}

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .await
            .map(ApiUser)
            .ok_or_else(|| ApiError::Unauthorized("No autorizado".into()))
    }
}
