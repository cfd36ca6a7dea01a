//! Lookups across clients and companies keyed by [`EntityKind`]

use async_trait::async_trait;

use crate::domain::{ContactStatus, EntityKind, EntityRef, EntitySummary};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    /// Name of the referenced client or company, if it still exists
    async fn name_of(&self, entity: EntityRef) -> Result<Option<String>, DomainError>;

    /// All entities of a kind, ordered by name
    async fn summaries(&self, kind: EntityKind) -> Result<Vec<EntitySummary>, DomainError>;

    /// Entities of a kind in the given pipeline status, ordered by name
    async fn summaries_with_status(
        &self,
        kind: EntityKind,
        status: ContactStatus,
    ) -> Result<Vec<EntitySummary>, DomainError>;
}
