//! Notification repository trait (port)

use async_trait::async_trait;

use crate::domain::{
    NewNotification, Notification, NotificationFilter, NotificationRow, NotificationSnapshot,
};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Priority first, then nearest due date, then newest
    async fn list(&self, filter: &NotificationFilter) -> Result<Vec<NotificationRow>, DomainError>;
    async fn create(&self, notification: &NewNotification) -> Result<Notification, DomainError>;
    async fn mark_read(&self, id: i32) -> Result<bool, DomainError>;
    async fn mark_all_read(&self, recipient_id: i32) -> Result<u64, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn count_unread(&self, recipient_id: i32) -> Result<i64, DomainError>;
    async fn count_priority_unread(&self, recipient_id: i32) -> Result<i64, DomainError>;

    /// Unread, non-priority rows with a due date
    async fn escalation_candidates(&self) -> Result<Vec<NotificationSnapshot>, DomainError>;
    async fn mark_priority(&self, ids: &[i32]) -> Result<u64, DomainError>;

    /// A recipient's notifications that carry a due date
    async fn list_dated_for(&self, recipient_id: i32) -> Result<Vec<Notification>, DomainError>;
}
