//! Per-request page setup shared by every HTML handler

use chrono::NaiveDate;
use tower_cookies::Cookies;
use tracing::{debug, warn};

use guiargo_core::AuthContext;

use crate::flash;
use crate::state::AppState;
use crate::views::{Chrome, Section};

/// Which escalation batches run before a page reads its data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalate {
    Notifications,
    All,
}

pub fn today() -> NaiveDate {
    guiargo_shared::utils::today()
}

/// Runs escalation, loads the navbar counters and consumes the pending flash.
///
/// Failures here are logged and never block the page.
pub async fn chrome(
    state: &AppState,
    cookies: &Cookies,
    user: &AuthContext,
    section: Section,
    escalate: Escalate,
) -> Chrome {
    let today = today();

    if escalate == Escalate::All {
        match state.escalation.escalate_follow_ups(today).await {
            Ok(0) => {}
            Ok(n) => debug!("{} follow-up(s) marked overdue", n),
            Err(e) => warn!("Follow-up escalation failed: {}", e),
        }
    }
    match state.escalation.escalate_notifications(today).await {
        Ok(0) => {}
        Ok(n) => debug!("{} notification(s) escalated", n),
        Err(e) => warn!("Notification escalation failed: {}", e),
    }

    let counters = state.notifications.counters(user.user_id).await.unwrap_or_else(|e| {
        warn!("Could not load notification counters for {}: {}", user.username, e);
        Default::default()
    });

    Chrome::new(&state.config.app.name, section, user, counters, flash::take(cookies), today)
}
