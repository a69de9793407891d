//! Resolução do closer configurado para o segmento do lead
//!
//! A consulta usa o handle confiável: o submitter do formulário é anônimo
//! e não enxerga a tabela `closers` pelo caminho restrito.

use uuid::Uuid;

use crate::models::{Closer, ScoreSegment, ScoringConfig};
use crate::services::datastore::Datastore;
use crate::utils::logging::*;

/// Nenhum closer configurado para a faixa de score do lead
pub const REASON_NO_CLOSER_CONFIGURED: &str = "No closer configured for this score range";
/// Closer configurado não existe, está inativo ou pertence a outro tenant
pub const REASON_CLOSER_UNAVAILABLE: &str = "Configured closer not available";

/// Resultado da resolução: closer elegível ou ausência com motivo
#[derive(Debug, Clone)]
pub enum CloserResolution {
    Resolved(Closer),
    Unresolved { reason: &'static str },
}

/// Resolve o closer do segmento contra a tabela `closers`
///
/// Falhas aqui nunca abortam a qualificação: o chamador segue sem
/// atribuição e o motivo aparece no `assignment_result`.
pub async fn resolve_closer(
    trusted: &dyn Datastore,
    segment: ScoreSegment,
    config: &ScoringConfig,
    organization_id: Uuid,
) -> CloserResolution {
    let configured = match segment {
        ScoreSegment::HighScore => config.high_score_closer_id,
        ScoreSegment::LowScore => config.low_score_closer_id,
    };

    let closer_id = match configured {
        Some(id) => id,
        None => {
            log_warning(&format!(
                "⚠️ Nenhum closer configurado para o segmento {}",
                segment.as_str()
            ));
            return CloserResolution::Unresolved {
                reason: REASON_NO_CLOSER_CONFIGURED,
            };
        }
    };

    let filters = [
        ("id", closer_id.to_string()),
        ("organization_id", organization_id.to_string()),
        ("ativo", "true".to_string()),
    ];

    match trusted.select_one("closers", &filters).await {
        Ok(Some(row)) => match serde_json::from_value::<Closer>(row) {
            Ok(closer) => CloserResolution::Resolved(closer),
            Err(e) => {
                log_error(&format!("❌ Linha de closer inválida ({}): {}", closer_id, e));
                CloserResolution::Unresolved {
                    reason: REASON_CLOSER_UNAVAILABLE,
                }
            }
        },
        Ok(None) => {
            log_warning(&format!(
                "⚠️ Closer configurado indisponível: id={}, organization_id={}, ativo=true",
                closer_id, organization_id
            ));
            CloserResolution::Unresolved {
                reason: REASON_CLOSER_UNAVAILABLE,
            }
        }
        Err(e) => {
            log_error(&format!("❌ Erro ao consultar closer {}: {}", closer_id, e));
            CloserResolution::Unresolved {
                reason: REASON_CLOSER_UNAVAILABLE,
            }
        }
    }
}
