//! Company management service

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::auth::AuthContext;
use crate::domain::{Company, CompanyDraft, ContactFilter};
use crate::error::DomainError;
use crate::repositories::CompanyRepository;

pub struct CompanyService<R: CompanyRepository> {
    company_repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(company_repo: Arc<R>) -> Self {
        Self { company_repo }
    }

    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<Company>, DomainError> {
        self.company_repo.list(filter).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Company>, DomainError> {
        self.company_repo.find_by_id(id).await
    }

    pub async fn create(&self, actor: &AuthContext, draft: CompanyDraft) -> Result<Company, DomainError> {
        draft.validate()?;
        let company = self.company_repo.create(&draft, actor.user_id).await?;
        info!("Company {} registered by {}", company.id, actor.username);
        Ok(company)
    }

    pub async fn update(&self, actor: &AuthContext, id: i32, draft: CompanyDraft) -> Result<(), DomainError> {
        draft.validate()?;
        if !self.company_repo.update(id, &draft).await? {
            return Err(DomainError::NotFound("Empresa no encontrada".into()));
        }
        info!("Company {} updated by {}", id, actor.username);
        Ok(())
    }

    /// Delete a company (admin only)
    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), DomainError> {
        if !actor.can_delete() {
            warn!("Permission denied: {} attempted to delete company {}", actor.username, id);
            return Err(DomainError::PermissionDenied);
        }
        if !self.company_repo.delete(id).await? {
            return Err(DomainError::NotFound("Empresa no encontrada".into()));
        }
        info!("Company {} deleted by {}", id, actor.username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::MockCompanyRepository;

    fn ctx(role: Role) -> AuthContext {
        AuthContext { user_id: 3, username: "beto".into(), role, email: "beto@guiargo.mx".into() }
    }

    #[tokio::test]
    async fn test_collaborator_cannot_delete() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_delete().never();

        let err = CompanyService::new(Arc::new(repo))
            .delete(&ctx(Role::Colaborador), 12)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No tienes permisos para realizar esta acción");
    }

    #[tokio::test]
    async fn test_admin_deletes() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_delete().withf(|id| *id == 12).times(1).returning(|_| Ok(true));

        assert!(CompanyService::new(Arc::new(repo)).delete(&ctx(Role::Admin), 12).await.is_ok());
    }

    #[tokio::test]
    async fn test_collaborator_may_update() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_update().returning(|_, _| Ok(true));

        let draft = CompanyDraft { name: "Aceros del Norte".into(), rfc: "ADN010101AAA".into(), ..Default::default() };
        assert!(CompanyService::new(Arc::new(repo))
            .update(&ctx(Role::Colaborador), 12, draft)
            .await
            .is_ok());
    }
}
