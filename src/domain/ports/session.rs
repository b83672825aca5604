//! Scoped database sessions
//!
//! A [`SessionProvider`] hands out one [`UnitOfWork`] per request. The unit
//! of work owns a single database session for its whole lifetime:
//!
//! ```ignore
//! let uow = provider.begin().await?;      // acquire
//! let user = uow.users().get_user_by_username("alice").await?;
//! uow.commit().await?;                    // release, keeping the writes
//! ```
//!
//! Dropping a unit of work without calling [`UnitOfWork::commit`] rolls the
//! session back and returns it to the pool, so every early return, `?`,
//! panic or cancelled future still releases it exactly once.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::domain::{DomainResult, UserRepositoryInterface};

/// One acquired database session.
pub trait UnitOfWork: Send + Sync {
    /// User store bound to this session.
    fn users(&self) -> &dyn UserRepositoryInterface;

    /// Commit and release the session.
    fn commit(self: Box<Self>) -> BoxFuture<'static, DomainResult<()>>;
}

/// Factory of scoped sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
}
