//! Integer id path parameter extractor.

use crate::validation::{FieldError, Location, ValidationErrors, predicates};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Message reported for an `id` segment that is not an integer
pub const INVALID_ID_MESSAGE: &str = "ID no válido";

/// Extractor for the `{id}` path parameter.
///
/// Rejects anything that is not an `i32` with a 400 validation error located
/// in `params`, before the handler runs.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl IdPath {
    /// Parse a raw segment the same way the extractor does
    pub fn parse(raw: &str) -> Result<i32, ValidationErrors> {
        predicates::parse_i32(raw).ok_or_else(|| invalid_id(raw))
    }
}

pub fn invalid_id(raw: &str) -> ValidationErrors {
    ValidationErrors::single(FieldError::new(
        Location::Params,
        "id",
        INVALID_ID_MESSAGE,
        Some(Value::String(raw.to_string())),
    ))
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        IdPath::parse(&raw)
            .map(IdPath)
            .map_err(|e| e.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        assert_eq!(IdPath::parse("42").unwrap(), 42);
    }

    #[test]
    fn test_parse_invalid_id_reports_raw_value() {
        let errors = IdPath::parse("abc").unwrap_err();
        assert_eq!(errors.len(), 1);

        let error = &errors.errors[0];
        assert_eq!(error.msg, INVALID_ID_MESSAGE);
        assert_eq!(error.path, "id");
        assert_eq!(error.location, Location::Params);
        assert_eq!(error.value, Some(Value::String("abc".into())));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(IdPath::parse("2147483648").is_err());
    }
}
