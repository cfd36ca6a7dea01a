//! # Guiargo Core - Domain Module
//! 
//! Domain entities for the administration panel.

pub mod user;
pub mod contact;
pub mod client;
pub mod company;
pub mod follow_up;
pub mod notification;
pub mod escalation;
pub mod filters;
pub mod dashboard;

// Re-export all entities and enums
pub use user::{Role, User, UserDraft, UserRef, NewUser, UserChanges};
pub use contact::{ContactStatus, EntitySummary};
pub use client::{Client, ClientDraft};
pub use company::{Company, CompanyDraft};
pub use follow_up::{EntityKind, EntityRef, FollowUp, FollowUpDraft, FollowUpRow, FollowUpStatus};
pub use notification::{NewNotification, Notification, NotificationKind, NotificationRequest, NotificationRow, FollowUpSeed};
pub use escalation::{
    FollowUpBadge, FollowUpSnapshot, NotificationBadge, NotificationSnapshot,
    follow_up_badge, follow_up_status, notification_badge, notification_priority,
};
pub use filters::{ContactFilter, DateRange, FollowUpFilter, NotificationFilter, UserFilter};
pub use dashboard::{CalendarEvent, DashboardStats, NotificationCounters};
