//! Company repository trait (port)

use async_trait::async_trait;

use crate::domain::{Company, CompanyDraft, ContactFilter};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Newest first
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Company>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DomainError>;
    async fn create(&self, draft: &CompanyDraft, created_by: i32) -> Result<Company, DomainError>;
    async fn update(&self, id: i32, draft: &CompanyDraft) -> Result<bool, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
