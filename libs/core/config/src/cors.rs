use crate::{env_required, ConfigError, FromEnv};

/// CORS configuration: the single browser origin allowed to call the API.
///
/// Requests that carry no `Origin` header (same-origin, curl, server-to-server)
/// are always accepted; see `axum_helpers::http::cors`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl CorsConfig {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }
}

impl FromEnv for CorsConfig {
    /// Requires FRONTEND_URL, e.g. `http://localhost:5173`
    fn from_env() -> Result<Self, ConfigError> {
        let origin = env_required("FRONTEND_URL")?;
        let origin = origin.trim().trim_end_matches('/');

        if origin.is_empty() {
            return Err(ConfigError::ParseError {
                key: "FRONTEND_URL".to_string(),
                details: "origin cannot be empty".to_string(),
            });
        }

        Ok(Self::new(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_from_env() {
        temp_env::with_var("FRONTEND_URL", Some("http://localhost:5173"), || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(config.allowed_origin, "http://localhost:5173");
        });
    }

    #[test]
    fn test_cors_config_strips_trailing_slash() {
        temp_env::with_var("FRONTEND_URL", Some(" https://shop.example.com/ "), || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(config.allowed_origin, "https://shop.example.com");
        });
    }

    #[test]
    fn test_cors_config_missing() {
        temp_env::with_var_unset("FRONTEND_URL", || {
            let err = CorsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("FRONTEND_URL"));
        });
    }

    #[test]
    fn test_cors_config_empty() {
        temp_env::with_var("FRONTEND_URL", Some("  "), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }
}
