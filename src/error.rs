// ============================================================================
// ERRORS - Errores de los servicios (API de datos, auth, storage, realtime)
// ============================================================================

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Código de PostgREST cuando `.single()` no encuentra la fila
pub const PGRST_NOT_FOUND: &str = "PGRST116";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Sessão expirada, faça login novamente")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Cuerpo de error de PostgREST / GoTrue / Storage (campos según el servicio)
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Construir el error a partir de status + cuerpo de la respuesta
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.code.as_ref().map(|c| match c {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        if code.as_deref() == Some(PGRST_NOT_FOUND) {
            return ApiError::NotFound;
        }

        let message = parsed
            .message
            .or(parsed.error_description)
            .or(parsed.msg)
            .or(parsed.error)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                }
            });

        if status == 401 && code.is_none() {
            return ApiError::Unauthorized;
        }

        ApiError::Http { status, code, message }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Parse(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

impl From<JsValue> for ApiError {
    fn from(e: JsValue) -> Self {
        ApiError::Browser(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

impl From<ApiError> for JsValue {
    fn from(e: ApiError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pgrst116_maps_to_not_found() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_eq!(ApiError::from_response(406, body), ApiError::NotFound);
    }

    #[test]
    fn test_postgrest_message_is_kept() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy"}"#;
        let err = ApiError::from_response(403, body);
        assert_eq!(err.to_string(), "new row violates row-level security policy");
        assert!(matches!(err, ApiError::Http { status: 403, .. }));
    }

    #[test]
    fn test_gotrue_errors() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(ApiError::from_response(400, body).to_string(), "Invalid login credentials");
        let numeric = r#"{"code":422,"msg":"Password should be at least 6 characters"}"#;
        let err = ApiError::from_response(422, numeric);
        assert_eq!(err.to_string(), "Password should be at least 6 characters");
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_response(500, "").to_string(), "HTTP 500");
    }
}
