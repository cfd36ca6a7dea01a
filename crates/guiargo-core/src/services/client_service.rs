//! Client management service

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::auth::AuthContext;
use crate::domain::{Client, ClientDraft, ContactFilter};
use crate::error::DomainError;
use crate::repositories::ClientRepository;

pub struct ClientService<R: ClientRepository> {
    client_repo: Arc<R>,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(client_repo: Arc<R>) -> Self {
        Self { client_repo }
    }

    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Client>, DomainError> {
        self.client_repo.list(filter).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Client>, DomainError> {
        self.client_repo.find_by_id(id).await
    }

    /// Register a client owned by the acting user
    pub async fn create(&self, actor: &AuthContext, draft: ClientDraft) -> Result<Client, DomainError> {
        draft.validate()?;
        let client = self.client_repo.create(&draft, actor.user_id).await?;
        info!("Client {} registered by {}", client.id, actor.username);
        Ok(client)
    }

    pub async fn update(&self, actor: &AuthContext, id: i32, draft: ClientDraft) -> Result<(), DomainError> {
        draft.validate()?;
        if !self.client_repo.update(id, &draft).await? {
            return Err(DomainError::NotFound("Cliente no encontrado".into()));
        }
        info!("Client {} updated by {}", id, actor.username);
        Ok(())
    }

    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), DomainError> {
        if !self.client_repo.delete(id).await? {
            return Err(DomainError::NotFound("Cliente no encontrado".into()));
        }
        info!("Client {} deleted by {}", id, actor.username);
        Ok(())
    }
}
