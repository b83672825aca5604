//! Domain layer: entities, repository contracts and ports.

pub mod ports;
pub mod user;

pub use ports::{SessionProvider, UnitOfWork};
pub use user::{CreateUserDto, User, UserRepositoryInterface, USERNAME_TAKEN};

// Re-export error types from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
