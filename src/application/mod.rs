//! Application layer: use-cases built on the domain ports.

pub mod identity;

pub use identity::AuthService;
