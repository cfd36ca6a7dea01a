//! User administration service

use std::sync::Arc;

use guiargo_security::PasswordService;
use guiargo_shared::utils::mask_email;
use tracing::{info, warn};
use validator::Validate;

use crate::auth::AuthContext;
use crate::domain::{NewUser, Role, User, UserChanges, UserDraft, UserFilter, UserRef};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct UserService<R: UserRepository> {
    user_repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        self.user_repo.list(filter).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>, DomainError> {
        self.user_repo.find_by_id(id).await
    }

    pub async fn active_users(&self) -> Result<Vec<UserRef>, DomainError> {
        self.user_repo.list_active().await
    }

    /// Create a user (admin only)
    pub async fn create(&self, actor: &AuthContext, draft: UserDraft) -> Result<User, DomainError> {
        self.guard_admin(actor, "create user")?;

        let password = draft.password.as_deref().map(str::trim).unwrap_or_default().to_string();
        if draft.username.trim().is_empty() || draft.email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError("Todos los campos son requeridos".into()));
        }
        draft.validate()?;
        self.ensure_unique(&draft, None).await?;

        let password_hash = hash(&password)?;
        let created = self
            .user_repo
            .create(&NewUser {
                username: draft.username,
                password_hash,
                role: draft.role,
                email: draft.email,
                active: draft.active,
            })
            .await?;

        info!("User {} created by {}", created.username, actor.username);
        Ok(created)
    }

    /// Update a user (admin only). A blank password keeps the stored hash.
    pub async fn update(&self, actor: &AuthContext, id: i32, draft: UserDraft) -> Result<(), DomainError> {
        self.guard_admin(actor, "update user")?;

        if draft.username.trim().is_empty() || draft.email.trim().is_empty() {
            return Err(DomainError::ValidationError("Username y email son requeridos".into()));
        }
        draft.validate()?;
        self.ensure_unique(&draft, Some(id)).await?;

        let password_hash = match draft.password.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(hash(p)?),
            _ => None,
        };

        let changes = UserChanges {
            username: draft.username,
            email: draft.email,
            role: draft.role,
            active: draft.active,
            password_hash,
        };
        if !self.user_repo.update(id, &changes).await? {
            return Err(DomainError::UserNotFound);
        }

        info!("User {} updated by {}", id, actor.username);
        Ok(())
    }

    /// Delete a user (admin only, never yourself)
    pub async fn delete(&self, actor: &AuthContext, id: i32) -> Result<(), DomainError> {
        if actor.user_id == id {
            warn!("User {} tried to delete their own account", actor.username);
            return Err(DomainError::CannotDeleteSelf);
        }
        self.guard_admin(actor, "delete user")?;

        if !self.user_repo.delete(id).await? {
            return Err(DomainError::UserNotFound);
        }

        info!("User {} deleted by {}", id, actor.username);
        Ok(())
    }

    /// Creates the first administrator when the users table is empty.
    pub async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let password = password.trim();
        if self.user_repo.count().await? > 0 {
            return Ok(None);
        }

        let draft = UserDraft {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: Some(password.to_string()),
            role: Role::Admin,
            active: true,
        };
        if draft.username.is_empty() || draft.email.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError("Todos los campos son requeridos".into()));
        }
        draft.validate()?;

        let created = self
            .user_repo
            .create(&NewUser {
                username: draft.username,
                password_hash: hash(password)?,
                role: Role::Admin,
                email: draft.email,
                active: true,
            })
            .await?;

        info!("Bootstrap administrator {} created ({})", created.username, mask_email(&created.email));
        Ok(Some(created))
    }

    fn guard_admin(&self, actor: &AuthContext, action: &str) -> Result<(), DomainError> {
        actor.require_admin().inspect_err(|_| {
            warn!("Permission denied: {} attempted to {}", actor.username, action);
        })
    }

    async fn ensure_unique(&self, draft: &UserDraft, exclude_id: Option<i32>) -> Result<(), DomainError> {
        if self.user_repo.username_taken(&draft.username, exclude_id).await? {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if self.user_repo.email_taken(&draft.email, exclude_id).await? {
            return Err(DomainError::EmailAlreadyExists);
        }
        Ok(())
    }
}

fn hash(password: &str) -> Result<String, DomainError> {
    PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;
    use chrono::Utc;

    fn admin() -> AuthContext {
        AuthContext { user_id: 1, username: "admin".into(), role: Role::Admin, email: "admin@guiargo.mx".into() }
    }

    fn collaborator() -> AuthContext {
        AuthContext { user_id: 2, username: "pepe".into(), role: Role::Colaborador, email: "pepe@guiargo.mx".into() }
    }

    fn draft(password: Option<&str>) -> UserDraft {
        UserDraft {
            username: "carla".into(),
            email: "carla@guiargo.mx".into(),
            password: password.map(str::to_string),
            role: Role::default(),
            active: true,
        }
    }

    fn stored(new: &NewUser) -> User {
        User {
            id: 10,
            username: new.username.clone(),
            password_hash: new.password_hash.clone(),
            role: new.role,
            email: new.email.clone(),
            active: new.active,
            registered_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password_and_defaults_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken().returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(false));
        repo.expect_create()
            .withf(|u| u.password_hash.starts_with("$argon2") && u.role == Role::Colaborador && u.active)
            .returning(|u| Ok(stored(u)));

        let user = UserService::new(Arc::new(repo))
            .create(&admin(), draft(Some("secreto1")))
            .await
            .unwrap();
        assert_eq!(user.username, "carla");
    }

    #[tokio::test]
    async fn test_create_accepts_short_password_and_plain_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken().returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(false));
        repo.expect_create().times(2).returning(|u| Ok(stored(u)));
        let service = UserService::new(Arc::new(repo));

        let short = UserDraft { username: "ana".into(), email: "ana@guiargo.mx".into(), ..draft(Some("abc")) };
        let user = service.create(&admin(), short).await.unwrap();
        assert!(PasswordService::verify("abc", &user.password_hash).unwrap());

        let plain = UserDraft { username: "ana".into(), email: "ana".into(), ..draft(Some("secreto1")) };
        assert!(service.create(&admin(), plain).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(&admin(), draft(Some("  ")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Todos los campos son requeridos");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken().returning(|_, _| Ok(true));
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(&admin(), draft(Some("secreto1")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "El nombre de usuario ya existe");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken().returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(true));
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(&admin(), draft(Some("secreto1")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "El correo electrónico ya existe");
    }

    #[tokio::test]
    async fn test_collaborator_cannot_create() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(&collaborator(), draft(Some("secreto1")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_update_excludes_self_and_keeps_hash_on_blank_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken()
            .withf(|_, exclude| *exclude == Some(5))
            .returning(|_, _| Ok(false));
        repo.expect_email_taken()
            .withf(|_, exclude| *exclude == Some(5))
            .returning(|_, _| Ok(false));
        repo.expect_update()
            .withf(|id, changes| *id == 5 && changes.password_hash.is_none())
            .returning(|_, _| Ok(true));

        UserService::new(Arc::new(repo))
            .update(&admin(), 5, draft(Some("")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_requires_username_and_email() {
        let repo = MockUserRepository::new();
        let mut d = draft(None);
        d.email = String::new();

        let err = UserService::new(Arc::new(repo)).update(&admin(), 5, d).await.unwrap_err();
        assert_eq!(err.to_string(), "Username y email son requeridos");
    }

    #[tokio::test]
    async fn test_self_delete_checked_before_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().never();
        let service = UserService::new(Arc::new(repo));

        let err = service.delete(&admin(), 1).await.unwrap_err();
        assert_eq!(err.to_string(), "No puedes eliminar tu propio usuario");

        let err = service.delete(&collaborator(), 2).await.unwrap_err();
        assert!(matches!(err, DomainError::CannotDeleteSelf));

        let err = service.delete(&collaborator(), 9).await.unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_admin_deletes_other_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().withf(|id| *id == 9).times(1).returning(|_| Ok(true));

        assert!(UserService::new(Arc::new(repo)).delete(&admin(), 9).await.is_ok());
    }

    #[tokio::test]
    async fn test_bootstrap_only_on_empty_table() {
        let mut repo = MockUserRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_create().never();

        let created = UserService::new(Arc::new(repo))
            .ensure_bootstrap_admin("admin", "admin@guiargo.mx", "cambiame123")
            .await
            .unwrap();
        assert!(created.is_none());

        let mut repo = MockUserRepository::new();
        repo.expect_count().returning(|| Ok(0));
        repo.expect_create()
            .withf(|u| u.role == Role::Admin)
            .returning(|u| Ok(stored(u)));

        let created = UserService::new(Arc::new(repo))
            .ensure_bootstrap_admin("admin", "admin@guiargo.mx", "cambiame123")
            .await
            .unwrap();
        assert_eq!(created.map(|u| u.role), Some(Role::Admin));
    }
}
