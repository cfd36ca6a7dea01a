//! # Guiargo API
//!
//! Server-rendered panel pages, JSON lookup endpoints and the axum router.

pub mod error;
pub mod extract;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

pub use router::build_router;
pub use state::AppState;
