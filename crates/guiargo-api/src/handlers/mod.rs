//! HTTP handlers

pub mod auth;
pub mod clients;
pub mod companies;
pub mod dashboard;
pub mod entities;
pub mod follow_ups;
pub mod health;
pub mod notifications;
pub mod page;
pub mod users;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// `302 Found` to `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
