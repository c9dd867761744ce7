//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
use crate::validation::ValidationErrors;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "",
            "msg": "El nombre de Producto no puede ir vacio",
            "path": "name",
            "location": "body"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrors);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid id",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "abc",
            "msg": "ID no válido",
            "path": "id",
            "location": "params"
        }]
    })
)]
pub struct BadRequestIdResponse(pub ValidationErrors);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"error": "Producto No Encontrado"})
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - Origin not allowed",
    content_type = "application/json",
    example = json!({"error": "Error de CORS"})
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"error": "Error interno del servidor"})
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
