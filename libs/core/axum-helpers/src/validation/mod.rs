//! Field-level request validation.
//!
//! Routes declare an ordered table of [`Rule`]s over a raw input struct whose
//! fields are still untyped JSON. Every rule runs, failures are collected in
//! declaration order and rendered as a single 400 response:
//!
//! ```json
//! {"errors": [{"type": "field", "value": "", "msg": "...", "path": "name", "location": "body"}]}
//! ```
//!
//! Once the rules pass, a [`ValidateInput`] impl converts the raw input into
//! the typed command the handler works with.

pub mod predicates;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::ErrorCode;

/// Message reported when a request body is not valid JSON
pub const INVALID_JSON_MESSAGE: &str = "JSON no válido";

/// Where the offending value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Field,
}

/// One failed rule
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
    /// The raw value as received; omitted when the field was absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(
        location: Location,
        path: impl Into<String>,
        msg: impl Into<String>,
        value: Option<Value>,
    ) -> Self {
        Self {
            kind: FieldErrorKind::Field,
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}

/// Ordered list of field errors, rendered as a 400 `{"errors": [...]}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// The body could not be parsed as a JSON object
    pub fn invalid_json() -> Self {
        Self::single(FieldError::new(
            Location::Body,
            "",
            INVALID_JSON_MESSAGE,
            None,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        tracing::info!(
            error_code = ErrorCode::ValidationError.code(),
            failed = self.len(),
            "Validation error: {}",
            self
        );
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// A single declarative check on one field of a raw input `T`
pub struct Rule<T> {
    pub location: Location,
    pub field: &'static str,
    pub message: &'static str,
    /// Reads the raw field; `None` when absent
    pub value: fn(&T) -> Option<&Value>,
    pub check: fn(Option<&Value>) -> bool,
}

impl<T> Rule<T> {
    fn apply(&self, input: &T) -> Option<FieldError> {
        let value = (self.value)(input);
        if (self.check)(value) {
            None
        } else {
            Some(FieldError::new(
                self.location,
                self.field,
                self.message,
                value.cloned(),
            ))
        }
    }
}

/// Run every rule against `input`, keeping failures in declaration order
pub fn run_rules<T>(input: &T, rules: &[Rule<T>]) -> ValidationErrors {
    ValidationErrors {
        errors: rules.iter().filter_map(|rule| rule.apply(input)).collect(),
    }
}

/// Conversion of a raw, untrusted input into its typed form
pub trait ValidateInput: Sized {
    type Output;

    fn validate_input(self) -> Result<Self::Output, ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Raw {
        name: Option<Value>,
        price: Option<Value>,
    }

    fn name(raw: &Raw) -> Option<&Value> {
        raw.name.as_ref()
    }

    fn price(raw: &Raw) -> Option<&Value> {
        raw.price.as_ref()
    }

    const RULES: &[Rule<Raw>] = &[
        Rule {
            location: Location::Body,
            field: "name",
            message: "name required",
            value: name,
            check: predicates::is_present,
        },
        Rule {
            location: Location::Body,
            field: "price",
            message: "price numeric",
            value: price,
            check: predicates::is_numeric,
        },
        Rule {
            location: Location::Body,
            field: "price",
            message: "price required",
            value: price,
            check: predicates::is_present,
        },
    ];

    #[test]
    fn test_run_rules_passes() {
        let raw = Raw {
            name: Some(json!("Monitor")),
            price: Some(json!(300)),
        };
        assert!(run_rules(&raw, RULES).is_empty());
    }

    #[test]
    fn test_run_rules_collects_in_declaration_order() {
        let raw = Raw {
            name: Some(json!("")),
            price: None,
        };
        let errors = run_rules(&raw, RULES);

        let messages: Vec<&str> = errors.errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec!["name required", "price numeric", "price required"]
        );
        assert_eq!(errors.errors[0].value, Some(json!("")));
        assert_eq!(errors.errors[1].value, None);
    }

    #[test]
    fn test_field_error_serialization() {
        let error = FieldError::new(Location::Params, "id", "bad id", Some(json!("abc")));
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"type": "field", "value": "abc", "msg": "bad id", "path": "id", "location": "params"})
        );
    }

    #[test]
    fn test_absent_value_is_omitted() {
        let error = FieldError::new(Location::Body, "price", "missing", None);
        let value = serde_json::to_value(&error).unwrap();
        assert!(value.get("value").is_none());
    }

    #[test]
    fn test_extend_and_into_result() {
        let mut errors = ValidationErrors::single(FieldError::new(Location::Params, "id", "a", None));
        errors.extend(ValidationErrors::invalid_json());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[1].msg, INVALID_JSON_MESSAGE);
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_into_response_is_bad_request() {
        let response = ValidationErrors::invalid_json().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
