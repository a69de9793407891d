use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "lead-qualification-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    log_integration_status_check();

    // Testa a conectividade com a interface REST do Supabase
    let supabase_status = match state.supabase.test_connection().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let overall_ready = supabase_status == "connected";

    let response = json!({
        "ready": overall_ready,
        "service": "lead-qualification-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "supabase": {
                "status": supabase_status,
                "url": state.settings.supabase.url
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_integration_status_check();

    let supabase_configured = !state.settings.supabase.url.is_empty()
        && !state.settings.supabase.anon_key.is_empty()
        && !state.settings.supabase.service_role_key.is_empty();

    let admin_key_configured = state
        .settings
        .admin
        .as_ref()
        .map(|admin| admin.api_key.is_some())
        .unwrap_or(false)
        || std::env::var("ADMIN_API_KEY").is_ok();

    Json(json!({
        "service": "lead-qualification-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()),
        "integrations": {
            "supabase": {
                "configured": supabase_configured,
                "url": state.settings.supabase.url,
                "anon_key_configured": !state.settings.supabase.anon_key.is_empty(),
                "service_role_key_configured": !state.settings.supabase.service_role_key.is_empty()
            },
            "booking": {
                "base_url": state.settings.booking.base_url,
                "default_organization_id": state.settings.booking.default_organization_id
            },
            "admin": {
                "api_key_configured": admin_key_configured
            }
        }
    }))
}
