//! Notification feed service

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use crate::auth::AuthContext;
use crate::domain::{
    FollowUpDraft, FollowUpStatus, NotificationCounters, NotificationFilter, NotificationRequest,
    NotificationRow,
};
use crate::error::DomainError;
use crate::repositories::{EntityDirectory, FollowUpRepository, NotificationRepository};

/// Per-recipient result of a fan-out create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationOutcome {
    pub created: usize,
    pub failed: usize,
    pub follow_up_id: Option<i32>,
}

impl CreationOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    pub fn message(&self) -> String {
        if self.is_complete() {
            format!("Notificación creada exitosamente para {} usuario(s)", self.created)
        } else {
            format!(
                "Notificación creada para {} usuario(s), {} error(es). Revisa los logs para más detalles.",
                self.created, self.failed
            )
        }
    }
}

pub struct NotificationService<N, F, D>
where
    N: NotificationRepository,
    F: FollowUpRepository,
    D: EntityDirectory,
{
    notification_repo: Arc<N>,
    follow_up_repo: Arc<F>,
    directory: Arc<D>,
}

impl<N, F, D> NotificationService<N, F, D>
where
    N: NotificationRepository,
    F: FollowUpRepository,
    D: EntityDirectory,
{
    pub fn new(notification_repo: Arc<N>, follow_up_repo: Arc<F>, directory: Arc<D>) -> Self {
        Self { notification_repo, follow_up_repo, directory }
    }

    pub async fn list(&self, filter: &NotificationFilter) -> Result<Vec<NotificationRow>, DomainError> {
        self.notification_repo.list(filter).await
    }

    pub async fn counters(&self, user_id: i32) -> Result<NotificationCounters, DomainError> {
        Ok(NotificationCounters {
            unread: self.notification_repo.count_unread(user_id).await?,
            priority: self.notification_repo.count_priority_unread(user_id).await?,
        })
    }

    pub async fn mark_read(&self, id: i32) -> Result<(), DomainError> {
        if !self.notification_repo.mark_read(id).await? {
            return Err(DomainError::NotFound("Notificación no encontrada".into()));
        }
        Ok(())
    }

    /// Marks the acting user's unread notifications as read
    pub async fn mark_all_read(&self, actor: &AuthContext) -> Result<u64, DomainError> {
        let updated = self.notification_repo.mark_all_read(actor.user_id).await?;
        info!("{} notifications marked as read for {}", updated, actor.username);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), DomainError> {
        if !self.notification_repo.delete(id).await? {
            return Err(DomainError::NotFound("Notificación no encontrada".into()));
        }
        info!("Notification {} deleted by {}", id, actor.username);
        Ok(())
    }

    /// Creates one notification per recipient, optionally linked to a new
    /// follow-up assigned to the acting user. Rows are inserted one by one;
    /// failures are counted, not rolled back.
    pub async fn create(
        &self,
        actor: &AuthContext,
        request: NotificationRequest,
    ) -> Result<CreationOutcome, DomainError> {
        request.validate()?;

        let follow_up_id = match &request.follow_up {
            Some(seed) => {
                if self.directory.name_of(seed.entity).await?.is_none() {
                    return Err(DomainError::ValidationError(
                        "La entidad seleccionada no existe".into(),
                    ));
                }
                let draft = FollowUpDraft {
                    entity: seed.entity,
                    assigned_user_id: actor.user_id,
                    scheduled_date: seed.scheduled_date,
                    description: seed.description.clone(),
                    status: FollowUpStatus::Pendiente,
                    completed_on: None,
                };
                let follow_up = self.follow_up_repo.create(&draft).await?;
                Some(follow_up.id)
            }
            None => None,
        };

        let mut outcome = CreationOutcome { created: 0, failed: 0, follow_up_id };
        for row in request.rows_for(follow_up_id) {
            match self.notification_repo.create(&row).await {
                Ok(_) => outcome.created += 1,
                Err(e) => {
                    error!("Failed to create notification for user {}: {}", row.recipient_id, e);
                    outcome.failed += 1;
                }
            }
        }

        if outcome.is_complete() {
            info!("{} created {} notification(s)", actor.username, outcome.created);
        } else {
            warn!(
                "{} created {} notification(s) with {} failure(s)",
                actor.username, outcome.created, outcome.failed
            );
        }
        Ok(outcome)
    }
}
