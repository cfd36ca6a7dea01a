//! Client repository trait (port)

use async_trait::async_trait;

use crate::domain::{Client, ClientDraft, ContactFilter};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Ordered by name
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Client>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, DomainError>;
    async fn create(&self, draft: &ClientDraft, created_by: i32) -> Result<Client, DomainError>;
    async fn update(&self, id: i32, draft: &ClientDraft) -> Result<bool, DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
