use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use tracing::debug;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, USERNAME_TAKEN,
};
use crate::infrastructure::database::entities::user;

/// SeaORM user store.
///
/// Generic over the connection so the same code runs on the pool itself or
/// inside a `DatabaseTransaction` owned by a unit of work.
pub struct SeaOrmUserRepository<C = DatabaseConnection> {
    conn: C,
}

impl<C> SeaOrmUserRepository<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn into_inner(self) -> C {
        self.conn
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        username: model.username,
        password: model.password,
        client_id: model.client_id,
        client_secret: model.client_secret,
        token_url: model.token_url,
        tenant_url: model.tenant_url,
        organization: model.organization,
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl<C> UserRepositoryInterface for SeaOrmUserRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(username)
            .one(&self.conn)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            username: Set(dto.username),
            password: Set(dto.password),
            client_id: Set(dto.client_id),
            client_secret: Set(dto.client_secret),
            token_url: Set(dto.token_url),
            tenant_url: Set(dto.tenant_url),
            organization: Set(dto.organization),
        };

        let model = new_user.insert(&self.conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                debug!(error = %e, "insert hit the users primary key");
                DomainError::Conflict(USERNAME_TAKEN.to_string())
            } else {
                DomainError::Database(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }
}
