use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoringConfigQuery {
    pub organization_id: Option<Uuid>,
}

/// Handler administrativo: inspeciona a configuração de scoring ativa
///
/// Retorna a configuração que o motor usaria para o tenant informado,
/// inclusive quando é o fallback embutido (`config_used: "default"`).
pub async fn get_scoring_config(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScoringConfigQuery>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/scoring-config", "GET");

    let organization_id = query
        .organization_id
        .unwrap_or(state.settings.booking.default_organization_id);

    let (config, config_used) = state.qualificacao.active_config(organization_id).await;

    Ok(Json(json!({
        "organization_id": organization_id,
        "config_used": config_used,
        "config": config,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
