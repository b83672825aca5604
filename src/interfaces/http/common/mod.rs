//! Shared HTTP building blocks: error body, error mapping, extractors.

pub mod error;
pub mod validated_json;

pub use error::ErrorResponse;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
