use sea_orm::{sqlx, DbErr, RuntimeErr};
use thiserror::Error;

/// Failures raised by the auth use-cases.
///
/// Request-schema failures never get here: they are rejected by the HTTP
/// extractor before a service is called.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost or
    /// a lock held by another session) and the operation may succeed if
    /// retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Database(DbErr::ConnectionAcquire(_))
                | DomainError::Database(DbErr::Conn(_))
        ) || self.is_lock_contention()
    }

    /// The store refused a statement because another session holds a
    /// conflicting lock: SQLite `BUSY`/`LOCKED` (extended codes included),
    /// Postgres serialization failure or deadlock.
    pub fn is_lock_contention(&self) -> bool {
        match self {
            DomainError::Database(e) => db_lock_contention(e),
            _ => false,
        }
    }
}

fn db_lock_contention(e: &DbErr) -> bool {
    let (DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
    | DbErr::Conn(RuntimeErr::SqlxError(sqlx::Error::Database(db)))) = e
    else {
        return false;
    };

    let Some(code) = db.code() else {
        return false;
    };
    if db.try_downcast_ref::<sqlx::sqlite::SqliteError>().is_some() {
        // Low byte is the primary result code
        return code
            .parse::<i32>()
            .map(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false);
    }
    matches!(&*code, "40001" | "40P01")
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnAcquireErr;

    #[test]
    fn display_prefixes_the_category() {
        let err = DomainError::Conflict("Username already exists".into());
        assert_eq!(err.to_string(), "Already exists: Username already exists");

        let err = DomainError::Unauthorized("Invalid credentials".into());
        assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");
    }

    #[test]
    fn only_connection_failures_are_transient() {
        let pool_timeout = DomainError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(pool_timeout.is_transient());

        let conn_lost = DomainError::from(DbErr::Conn(RuntimeErr::Internal("reset".into())));
        assert!(conn_lost.is_transient());

        assert!(!DomainError::Conflict("dup".into()).is_transient());
        assert!(!DomainError::from(DbErr::RecordNotInserted).is_transient());
    }

    #[test]
    fn lock_contention_needs_a_driver_error() {
        assert!(!DomainError::from(DbErr::Custom("database is locked".into())).is_lock_contention());
        assert!(!DomainError::from(DbErr::Exec(RuntimeErr::Internal("locked".into()))).is_lock_contention());
        assert!(!DomainError::Conflict("dup".into()).is_lock_contention());
    }
}
