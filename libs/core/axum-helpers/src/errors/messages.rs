//! User-facing messages shared by the HTTP layer.

pub const INTERNAL_ERROR: &str = "Error interno del servidor";
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";
pub const CORS_REJECTED: &str = "Error de CORS";
