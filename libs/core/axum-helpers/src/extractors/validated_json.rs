//! Lenient JSON body extractors.

use crate::errors::ErrorCode;
use crate::validation::{ValidateInput, ValidationErrors};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw JSON object body.
///
/// An empty body reads as `{}` so that missing fields surface as field
/// validation errors. A body that is not a JSON object is rejected with a
/// single `body` error.
pub struct JsonPayload<T>(pub T);

impl<T> JsonPayload<T>
where
    T: DeserializeOwned,
{
    pub fn from_bytes(bytes: &[u8]) -> Result<T, ValidationErrors> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Object(Default::default()))
                .map_err(|_| ValidationErrors::invalid_json());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| ValidationErrors::invalid_json())
            }
            _ => Err(ValidationErrors::invalid_json()),
        }
    }
}

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        Self::from_bytes(&bytes).map(JsonPayload).map_err(|e| {
            tracing::debug!(error_code = ErrorCode::InvalidJson.code(), "Unreadable JSON body");
            e.into_response()
        })
    }
}

/// JSON body run through its [`ValidateInput`] rules.
///
/// The handler receives the typed output; a body that breaks any rule is
/// answered with 400 and the full list of failures.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<ProductPayload>) -> ... {
///     // input: CreateProduct
/// }
/// ```
pub struct ValidatedJson<T: ValidateInput>(pub T::Output);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidateInput,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonPayload(raw) = JsonPayload::<T>::from_request(req, state).await?;

        raw.validate_input()
            .map(ValidatedJson)
            .map_err(|e| e.into_response())
    }
}
