//! Authentication service: login and per-request session resolution

use std::sync::Arc;

use guiargo_security::{PasswordService, SessionError, SessionIdentity, SessionService};
use guiargo_shared::utils::mask_email;
use tracing::{info, warn};

use crate::auth::AuthContext;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService<R: UserRepository> {
    user_repo: Arc<R>,
    sessions: Arc<SessionService>,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub context: AuthContext,
    pub session_token: String,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repo: Arc<R>, sessions: Arc<SessionService>) -> Self {
        Self { user_repo, sessions }
    }

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::MissingCredentials);
        }

        info!("Login attempt for username: {}", username);

        // 1. Only active users may log in
        let user = self
            .user_repo
            .find_active_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: no active user named {}", username);
                DomainError::UserNotFound
            })?;

        // 2. Verify password (argon2, or bcrypt for imported hashes)
        let valid = PasswordService::verify(password, &user.password_hash).unwrap_or_else(|e| {
            warn!("Login failed: unreadable password hash for user {}: {}", user.id, e);
            false
        });
        if !valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Upgrade legacy hashes in place
        if PasswordService::is_legacy(&user.password_hash) {
            match PasswordService::hash(password) {
                Ok(upgraded) => {
                    if let Err(e) = self.user_repo.update_password_hash(user.id, &upgraded).await {
                        warn!("Failed to upgrade legacy hash for user {}: {}", user.id, e);
                    } else {
                        info!("Upgraded legacy password hash for user {}", user.id);
                    }
                }
                Err(e) => warn!("Failed to rehash password for user {}: {}", user.id, e),
            }
        }

        // 4. Issue session token
        let context = AuthContext::from(&user);
        let session_token = self.sessions.issue(&identity_of(&context)).map_err(|e| {
            DomainError::SessionError(e.to_string())
        })?;

        info!(
            "Login successful for: {} ({})",
            context.username,
            mask_email(&context.email)
        );

        Ok(LoginResult { context, session_token })
    }

    /// Resolves the session cookie into a fresh [`AuthContext`].
    ///
    /// The user row is re-read so deactivation and role changes apply on the
    /// next request.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, DomainError> {
        let claims = self.sessions.verify(token).map_err(|e| match e {
            SessionError::Expired => DomainError::SessionError("session expired".to_string()),
            other => DomainError::SessionError(other.to_string()),
        })?;

        let user = self
            .user_repo
            .find_by_id(claims.usuario_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if !user.can_login() {
            warn!("Rejected session for inactive user {}", user.id);
            return Err(DomainError::UserNotActive);
        }

        Ok(AuthContext::from(&user))
    }

    pub fn session_max_age_seconds(&self) -> i64 {
        self.sessions.expiry_seconds()
    }
}

fn identity_of(context: &AuthContext) -> SessionIdentity {
    SessionIdentity {
        user_id: context.user_id,
        username: context.username.clone(),
        role: context.role.as_str().to_string(),
        email: context.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, User};
    use crate::repositories::MockUserRepository;
    use chrono::Utc;

    fn user(password_hash: &str, active: bool) -> User {
        User {
            id: 7,
            username: "andrea".into(),
            password_hash: password_hash.into(),
            role: Role::Colaborador,
            email: "andrea@guiargo.mx".into(),
            active,
            registered_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), Arc::new(SessionService::new("test-secret", 1)))
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_before_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_active_by_username().never();

        let err = service(repo).login("  ", "secreto").await.unwrap_err();
        assert!(matches!(err, DomainError::MissingCredentials));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_active_by_username().returning(|_| Ok(None));

        let err = service(repo).login("nadie", "secreto").await.unwrap_err();
        assert_eq!(err.to_string(), "Usuario no encontrado");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let hash = PasswordService::hash("correcta").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_active_by_username()
            .returning(move |_| Ok(Some(user(&hash, true))));

        let err = service(repo).login("andrea", "incorrecta").await.unwrap_err();
        assert_eq!(err.to_string(), "Contraseña incorrecta");
    }

    #[tokio::test]
    async fn test_login_then_authenticate() {
        let hash = PasswordService::hash("correcta").unwrap();
        let stored = user(&hash, true);
        let by_id = stored.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_active_by_username()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_find_by_id()
            .withf(|id| *id == 7)
            .returning(move |_| Ok(Some(by_id.clone())));
        repo.expect_update_password_hash().never();

        let service = service(repo);
        let result = service.login(" andrea ", "correcta").await.unwrap();
        assert_eq!(result.context.user_id, 7);

        let ctx = service.authenticate(&result.session_token).await.unwrap();
        assert_eq!(ctx.username, "andrea");
        assert_eq!(ctx.role, Role::Colaborador);
    }

    #[tokio::test]
    async fn test_legacy_hash_is_upgraded() {
        let legacy = bcrypt::hash("correcta", 4).unwrap().replacen("$2b$", "$2y$", 1);
        let mut repo = MockUserRepository::new();
        repo.expect_find_active_by_username()
            .returning(move |_| Ok(Some(user(&legacy, true))));
        repo.expect_update_password_hash()
            .withf(|id, hash| *id == 7 && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(service(repo).login("andrea", "correcta").await.is_ok());
    }

    #[tokio::test]
    async fn test_deactivated_user_loses_session() {
        let sessions = Arc::new(SessionService::new("test-secret", 1));
        let token = sessions
            .issue(&SessionIdentity {
                user_id: 7,
                username: "andrea".into(),
                role: "admin".into(),
                email: "andrea@guiargo.mx".into(),
            })
            .unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(user("x", false))));

        let service = AuthService::new(Arc::new(repo), sessions);
        let err = service.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotActive));
    }

    #[tokio::test]
    async fn test_role_comes_from_database() {
        let sessions = Arc::new(SessionService::new("test-secret", 1));
        let token = sessions
            .issue(&SessionIdentity {
                user_id: 7,
                username: "andrea".into(),
                role: "admin".into(),
                email: "andrea@guiargo.mx".into(),
            })
            .unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(user("x", true))));

        let ctx = AuthService::new(Arc::new(repo), sessions)
            .authenticate(&token)
            .await
            .unwrap();
        assert!(!ctx.is_admin());
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let err = service(repo).authenticate("not.a.token").await.unwrap_err();
        assert!(matches!(err, DomainError::SessionError(_)));
    }
}
