//! # Auth Service
//!
//! Minimal authentication backend: `POST /auth/register` and
//! `POST /auth/login` over a relational `users` table.
//!
//! ## Architecture
//!
//! - **domain**: User entity, repository contract, scoped-session ports
//! - **application**: auth use-cases (`AuthService`)
//! - **infrastructure**: SeaORM entities, migrations, repositories, sessions
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error types and shutdown coordination
//!
//! Passwords are stored and compared in plaintext. There is no hashing,
//! token issuance or session management.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmSessionProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
