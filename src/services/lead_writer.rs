//! Gravação de score e atribuição no lead
//!
//! Os updates usam o handle confiável: a qualificação roda em nome de um
//! submitter anônimo que não é dono do lead, então o caminho restrito
//! bloquearia a escrita. Ambas as operações são update-by-id; reprocessar
//! o mesmo lead sobrescreve os valores anteriores sem duplicar linhas.

use serde_json::json;
use supabase::SupabaseError;
use uuid::Uuid;

use crate::services::datastore::Datastore;
use crate::services::scoring::ScoreEvaluation;
use crate::utils::logging::*;

/// Grava `lead_score` e o detalhamento no lead
///
/// Best-effort: falha é logada e reportada como `false`, nunca aborta a
/// qualificação (o lead já existe e a resposta segue com o score).
pub async fn write_score(trusted: &dyn Datastore, lead_id: Uuid, evaluation: &ScoreEvaluation) -> bool {
    let patch = json!({
        "lead_score": evaluation.total,
        "lead_score_detalhado": {
            "total": evaluation.total,
            "details": evaluation.details,
        }
    });

    match trusted
        .update("leads", &[("id", lead_id.to_string())], &patch)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            log_error(&format!(
                "❌ Erro ao gravar score no lead {}: {}",
                lead_id, e
            ));
            false
        }
    }
}

/// Grava o closer atribuído no lead
pub async fn assign_closer(
    trusted: &dyn Datastore,
    lead_id: Uuid,
    closer_id: Uuid,
) -> Result<(), SupabaseError> {
    trusted
        .update(
            "leads",
            &[("id", lead_id.to_string())],
            &json!({ "closer_id": closer_id.to_string() }),
        )
        .await
}
