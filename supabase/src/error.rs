//! Tipos de erro para o crate supabase

use thiserror::Error;

/// Erros do cliente Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Erro de requisição HTTP
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API REST (status code não-2xx)
    #[error("Supabase API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Linha não encontrada onde uma era esperada
    #[error("Row not found: {0}")]
    NotFound(String),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, SupabaseError>;
