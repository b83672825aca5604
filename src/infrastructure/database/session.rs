//! SeaORM-backed scoped sessions
//!
//! Each unit of work wraps one `DatabaseTransaction`. Committing consumes
//! it; dropping it uncommitted rolls back and hands the connection back to
//! the pool.

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::repositories::SeaOrmUserRepository;
use crate::domain::{DomainResult, SessionProvider, UnitOfWork, UserRepositoryInterface};

/// Session factory over one connection pool.
#[derive(Clone)]
pub struct SeaOrmSessionProvider {
    db: DatabaseConnection,
}

impl SeaOrmSessionProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionProvider for SeaOrmSessionProvider {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await?;
        debug!("session acquired");
        Ok(Box::new(SeaOrmUnitOfWork {
            users: SeaOrmUserRepository::new(txn),
        }))
    }
}

struct SeaOrmUnitOfWork {
    users: SeaOrmUserRepository<DatabaseTransaction>,
}

impl UnitOfWork for SeaOrmUnitOfWork {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn commit(self: Box<Self>) -> BoxFuture<'static, DomainResult<()>> {
        let SeaOrmUnitOfWork { users } = *self;
        Box::pin(async move {
            users.into_inner().commit().await?;
            debug!("session committed");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateUserDto;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use sea_orm_migration::MigratorTrait;

    async fn provider() -> SeaOrmSessionProvider {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmSessionProvider::new(db)
    }

    fn dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "password123".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            token_url: "https://idp.example/token".to_string(),
            tenant_url: "https://tenant.example".to_string(),
            organization: "acme".to_string(),
        }
    }

    #[tokio::test]
    async fn committed_writes_are_visible_to_the_next_session() {
        let provider = provider().await;

        let uow = provider.begin().await.unwrap();
        uow.users().create_user(dto("alice")).await.unwrap();
        uow.commit().await.unwrap();

        let uow = provider.begin().await.unwrap();
        assert!(uow.users().get_user_by_username("alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn dropped_session_rolls_back_and_releases() {
        let provider = provider().await;

        {
            let uow = provider.begin().await.unwrap();
            uow.users().create_user(dto("bob")).await.unwrap();
        }

        // The pool holds a single connection: this only succeeds if the
        // dropped session gave it back.
        let uow = provider.begin().await.unwrap();
        assert!(uow.users().get_user_by_username("bob").await.unwrap().is_none());
    }
}
