//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserFilter, UserRef};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> Result<bool, DomainError>;
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn update(&self, id: i32, changes: &UserChanges) -> Result<bool, DomainError>;
    async fn update_password_hash(&self, id: i32, password_hash: &str) -> Result<(), DomainError>;
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Active users ordered by username
    async fn list_active(&self) -> Result<Vec<UserRef>, DomainError>;
}
