use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    SupabaseApi(String),
    ConfigError(String),
    JsonError(serde_json::Error),
    ValidationError(String),
    PersistenceError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::SupabaseApi(msg) => write!(f, "Supabase API error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::JsonError(err) => write!(f, "JSON error: {}", err),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

impl From<supabase::SupabaseError> for AppError {
    fn from(err: supabase::SupabaseError) -> Self {
        AppError::SupabaseApi(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Falha de persistência do lead segue o contrato do formulário:
            // erro fixo com os detalhes em campo separado
            AppError::PersistenceError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "Erro ao criar lead",
                    "details": details
                }),
            ),
            AppError::SupabaseApi(msg) => error_body(StatusCode::BAD_GATEWAY, msg),
            AppError::ConfigError(msg) => error_body(StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::JsonError(err) => error_body(StatusCode::BAD_REQUEST, err.to_string()),
            AppError::ValidationError(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => error_body(StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(body)).into_response()
    }
}

fn error_body(status: StatusCode, message: String) -> (StatusCode, Value) {
    (
        status,
        json!({
            "success": false,
            "error": message,
            "status": status.as_u16()
        }),
    )
}

pub type AppResult<T> = Result<T, AppError>;
