//! Auth service: application-layer orchestration
//!
//! Every use-case works in units of work opened from the injected
//! [`SessionProvider`]; each one is either committed or dropped.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, SessionProvider, User, USERNAME_TAKEN,
};

/// Message shared by both login failure causes so responses cannot be used
/// to probe which usernames exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration attempts made while the store reports lock contention.
const MAX_REGISTER_ATTEMPTS: u32 = 5;

/// Base delay between registration attempts, multiplied by the attempt number.
const REGISTER_RETRY_DELAY: Duration = Duration::from_millis(20);

/// Auth service: register and authenticate users.
#[derive(Clone)]
pub struct AuthService {
    sessions: Arc<dyn SessionProvider>,
}

impl AuthService {
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        Self { sessions }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Return the user when `password` equals the stored one.
    ///
    /// Unknown user and wrong password both yield the same
    /// `DomainError::Unauthorized`.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<User> {
        let uow = self.sessions.begin().await?;
        let user = uow.users().get_user_by_username(username).await?;
        uow.commit().await?;

        match user {
            Some(user) if user.password_matches(password) => {
                record_attempt("login", "success");
                info!(username = %user.username, "User logged in");
                Ok(user)
            }
            Some(_) => {
                record_attempt("login", "unauthorized");
                warn!(username, "Login rejected: wrong password");
                Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
            None => {
                record_attempt("login", "unauthorized");
                warn!(username, "Login rejected: unknown user");
                Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Insert a new user and return the persisted row.
    ///
    /// Field contents are not checked here; the request schema does that.
    /// Of several concurrent registrations for one username exactly one
    /// succeeds and the others get `DomainError::Conflict`.
    pub async fn register(&self, dto: CreateUserDto) -> DomainResult<User> {
        let username = dto.username.clone();
        let result = self.register_with_retry(dto).await;

        match &result {
            Ok(_) => {
                record_attempt("register", "success");
                info!(username = %username, "New user registered");
            }
            Err(DomainError::Conflict(_)) => {
                record_attempt("register", "conflict");
                warn!(username = %username, "Registration rejected: username taken");
            }
            Err(e) => {
                record_attempt("register", "error");
                error!(username = %username, error = %e, "Registration failed");
            }
        }
        result
    }

    async fn register_with_retry(&self, dto: CreateUserDto) -> DomainResult<User> {
        let mut attempt = 1;
        loop {
            let err = match self.try_register(dto.clone()).await {
                Err(e @ DomainError::Database(_)) => e,
                other => return other,
            };

            // A rival registration for the same name can make the store fail
            // with a lock error instead of a key violation. Once the rival
            // has committed the name is simply taken.
            if self.username_exists(&dto.username).await? {
                debug!(error = %err, "Registration lost a race for the username");
                return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
            }
            if !err.is_lock_contention() || attempt >= MAX_REGISTER_ATTEMPTS {
                return Err(err);
            }

            warn!(attempt, error = %err, "Registration hit lock contention, retrying");
            tokio::time::sleep(REGISTER_RETRY_DELAY * attempt).await;
            attempt += 1;
        }
    }

    /// One unit of work: existence check, insert, commit.
    async fn try_register(&self, dto: CreateUserDto) -> DomainResult<User> {
        let uow = self.sessions.begin().await?;

        if uow.users().get_user_by_username(&dto.username).await?.is_some() {
            return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
        }

        // A primary-key violation from a concurrent insert comes back as
        // Conflict from the store.
        let user = uow.users().create_user(dto).await?;
        uow.commit().await?;
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> DomainResult<bool> {
        let uow = self.sessions.begin().await?;
        let found = uow.users().get_user_by_username(username).await?.is_some();
        uow.commit().await?;
        Ok(found)
    }
}

fn record_attempt(operation: &'static str, outcome: &'static str) {
    metrics::counter!("auth_attempts_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}
