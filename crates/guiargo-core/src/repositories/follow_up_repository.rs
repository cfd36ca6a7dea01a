//! Follow-up repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{FollowUp, FollowUpDraft, FollowUpFilter, FollowUpRow, FollowUpSnapshot};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowUpRepository: Send + Sync {
    /// Ordered by scheduled date ascending
    async fn list(&self, filter: &FollowUpFilter) -> Result<Vec<FollowUpRow>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<FollowUp>, DomainError>;
    async fn create(&self, draft: &FollowUpDraft) -> Result<FollowUp, DomainError>;
    async fn update(&self, id: i32, draft: &FollowUpDraft) -> Result<bool, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn mark_completed(&self, id: i32, on: NaiveDate) -> Result<bool, DomainError>;

    /// Open `Pendiente` rows without a completion date
    async fn escalation_candidates(&self) -> Result<Vec<FollowUpSnapshot>, DomainError>;
    async fn mark_overdue(&self, ids: &[i32]) -> Result<u64, DomainError>;

    /// Follow-ups assigned to a user, with entity names resolved
    async fn list_assigned_to(&self, user_id: i32) -> Result<Vec<FollowUpRow>, DomainError>;
}
