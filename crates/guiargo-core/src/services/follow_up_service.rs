//! Follow-up scheduling service

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::auth::AuthContext;
use crate::domain::{
    ContactStatus, EntityKind, EntitySummary, FollowUp, FollowUpDraft, FollowUpFilter, FollowUpRow,
    UserRef,
};
use crate::error::DomainError;
use crate::repositories::{EntityDirectory, FollowUpRepository, UserRepository};

/// Options for the follow-up form selects
#[derive(Debug, Clone, Default, Serialize)]
pub struct FollowUpPickLists {
    pub clients: Vec<EntitySummary>,
    pub companies: Vec<EntitySummary>,
    pub users: Vec<UserRef>,
}

pub struct FollowUpService<F, D, U>
where
    F: FollowUpRepository,
    D: EntityDirectory,
    U: UserRepository,
{
    follow_up_repo: Arc<F>,
    directory: Arc<D>,
    user_repo: Arc<U>,
}

impl<F, D, U> FollowUpService<F, D, U>
where
    F: FollowUpRepository,
    D: EntityDirectory,
    U: UserRepository,
{
    pub fn new(follow_up_repo: Arc<F>, directory: Arc<D>, user_repo: Arc<U>) -> Self {
        Self { follow_up_repo, directory, user_repo }
    }

    pub async fn list(&self, filter: &FollowUpFilter) -> Result<Vec<FollowUpRow>, DomainError> {
        self.follow_up_repo.list(filter).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<FollowUp>, DomainError> {
        self.follow_up_repo.find_by_id(id).await
    }

    /// Clients and companies currently `En seguimiento`, plus active users
    pub async fn pick_lists(&self) -> Result<FollowUpPickLists, DomainError> {
        Ok(FollowUpPickLists {
            clients: self
                .directory
                .summaries_with_status(EntityKind::Cliente, ContactStatus::EnSeguimiento)
                .await?,
            companies: self
                .directory
                .summaries_with_status(EntityKind::Empresa, ContactStatus::EnSeguimiento)
                .await?,
            users: self.user_repo.list_active().await?,
        })
    }

    pub async fn create(
        &self,
        actor: &AuthContext,
        draft: FollowUpDraft,
        today: NaiveDate,
    ) -> Result<FollowUp, DomainError> {
        let draft = self.checked(draft, today).await?;
        let follow_up = self.follow_up_repo.create(&draft).await?;
        info!(
            "Follow-up {} for {} {} created by {}",
            follow_up.id,
            follow_up.entity.kind().as_str(),
            follow_up.entity.id(),
            actor.username
        );
        Ok(follow_up)
    }

    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i32,
        draft: FollowUpDraft,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        let draft = self.checked(draft, today).await?;
        if !self.follow_up_repo.update(id, &draft).await? {
            return Err(DomainError::NotFound("Seguimiento no encontrado".into()));
        }
        info!("Follow-up {} updated by {}", id, actor.username);
        Ok(())
    }

    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), DomainError> {
        if !self.follow_up_repo.delete(id).await? {
            return Err(DomainError::NotFound("Seguimiento no encontrado".into()));
        }
        info!("Follow-up {} deleted by {}", id, actor.username);
        Ok(())
    }

    pub async fn mark_completed(&self, actor: &AuthContext, id: i32, today: NaiveDate) -> Result<(), DomainError> {
        if !self.follow_up_repo.mark_completed(id, today).await? {
            return Err(DomainError::NotFound("Seguimiento no encontrado".into()));
        }
        info!("Follow-up {} completed by {}", id, actor.username);
        Ok(())
    }

    async fn checked(&self, draft: FollowUpDraft, today: NaiveDate) -> Result<FollowUpDraft, DomainError> {
        draft.validate()?;
        if self.directory.name_of(draft.entity).await?.is_none() {
            return Err(DomainError::ValidationError(
                "La entidad seleccionada no existe".into(),
            ));
        }
        Ok(draft.normalized(today))
    }
}
