use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

/// Message for a username that is already taken.
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Table-backed user store, bound to one unit of work.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Insert a new row and return it as persisted.
    ///
    /// A primary-key collision is reported as `DomainError::Conflict` with
    /// [`USERNAME_TAKEN`].
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;
}
