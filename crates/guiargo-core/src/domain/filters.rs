//! Listing filters
//!
//! Every field is optional; an unset field adds no condition.

use chrono::NaiveDate;

use super::{ContactStatus, EntityKind, FollowUpStatus, NotificationKind, Role};

/// Inclusive date bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Shared by the clients and companies listings
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub search: Option<String>,
    pub status: Option<ContactStatus>,
    pub city: Option<String>,
    pub registered: DateRange,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Matches username or email
    pub search: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
    pub registered: DateRange,
}

#[derive(Debug, Clone, Default)]
pub struct FollowUpFilter {
    /// Matches description or entity name
    pub search: Option<String>,
    pub entity_kind: Option<EntityKind>,
    pub status: Option<FollowUpStatus>,
    pub scheduled: DateRange,
    pub assigned_user_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub kind: Option<NotificationKind>,
    pub read: Option<bool>,
    pub priority: Option<bool>,
    pub sent: DateRange,
}
