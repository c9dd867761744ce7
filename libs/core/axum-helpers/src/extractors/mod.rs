//! Custom extractors for Axum handlers.
//!
//! Every rejection renders the same `{"errors": [...]}` body as rule
//! failures, so clients handle one shape for all bad input.

pub mod id_path;
pub mod validated_json;

pub use id_path::{INVALID_ID_MESSAGE, IdPath};
pub use validated_json::{JsonPayload, ValidatedJson};
