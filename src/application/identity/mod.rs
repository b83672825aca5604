//! Identity bounded context: registration and credential checks.

pub mod service;

pub use service::AuthService;
