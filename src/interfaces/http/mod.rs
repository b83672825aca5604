//! HTTP REST API interfaces
//!
//! - `common`: error body, domain error mapping, validated JSON extractor
//! - `modules`: handlers and DTOs per resource, plus middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
