/// Middleware de autenticação para endpoints administrativos
///
/// Valida o header X-Admin-Key contra a chave configurada em
/// `admin.api_key` (ou na variável de ambiente ADMIN_API_KEY). Sem chave
/// configurada, o acesso é liberado em desenvolvimento com warning e
/// bloqueado em produção.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

/// Decisão de autorização, separada do transporte para ser testável
#[derive(Debug, PartialEq, Eq)]
enum AdminAccess {
    Granted,
    GrantedDevFallback,
    Denied,
    Misconfigured,
}

fn authorize(expected: Option<&str>, provided: Option<&str>, is_production: bool) -> AdminAccess {
    match expected {
        Some(expected) if provided == Some(expected) => AdminAccess::Granted,
        Some(_) => AdminAccess::Denied,
        None if is_production => AdminAccess::Misconfigured,
        None => AdminAccess::GrantedDevFallback,
    }
}

/// Exige X-Admin-Key válido nos endpoints /admin/*
pub async fn require_admin_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let provided = headers.get("X-Admin-Key").and_then(|v| v.to_str().ok());

    let configured = state
        .settings
        .admin
        .as_ref()
        .and_then(|admin| admin.api_key.clone())
        .or_else(|| std::env::var("ADMIN_API_KEY").ok());

    let is_production = std::env::var("RUST_ENV")
        .unwrap_or_else(|_| "development".to_string())
        == "production";

    match authorize(configured.as_deref(), provided, is_production) {
        AdminAccess::Granted => {
            tracing::debug!("✅ Admin access granted");
            Ok(next.run(request).await)
        }
        AdminAccess::GrantedDevFallback => {
            tracing::warn!(
                "⚠️  admin.api_key não configurado - liberando acesso em desenvolvimento. \
                 Configure ADMIN_API_KEY em produção!"
            );
            Ok(next.run(request).await)
        }
        AdminAccess::Denied => {
            tracing::warn!("❌ Admin access denied - X-Admin-Key ausente ou inválido");
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Missing or invalid X-Admin-Key header"
                })),
            )
                .into_response())
        }
        AdminAccess::Misconfigured => {
            tracing::error!("🚨 admin.api_key não configurado em produção! Bloqueando acesso.");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "Service Unavailable",
                    "message": "ADMIN_API_KEY not configured on server"
                })),
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chave_correta_libera() {
        assert_eq!(
            authorize(Some("chave-123"), Some("chave-123"), true),
            AdminAccess::Granted
        );
    }

    #[test]
    fn test_chave_incorreta_ou_ausente_bloqueia() {
        assert_eq!(
            authorize(Some("chave-123"), Some("outra"), false),
            AdminAccess::Denied
        );
        assert_eq!(authorize(Some("chave-123"), None, false), AdminAccess::Denied);
    }

    #[test]
    fn test_sem_chave_configurada_depende_do_ambiente() {
        assert_eq!(authorize(None, None, false), AdminAccess::GrantedDevFallback);
        assert_eq!(authorize(None, Some("qualquer"), true), AdminAccess::Misconfigured);
    }
}
