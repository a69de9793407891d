//! Avaliação de score e classificação de segmento
//!
//! Funções puras: recebem os campos submetidos e uma configuração de
//! pontuação e produzem o total com o detalhamento por campo. Nenhum
//! acesso a dados acontece aqui.

use once_cell::sync::Lazy;

use crate::models::{
    NivelInteresse, QualificationRequest, ScoreDetail, ScoreSegment, ScoringConfig, Temperatura,
};

/// Regra de pontuação embutida, usada quando o tenant não tem configuração
/// ativa. Valores congelados do fallback original do formulário.
pub static DEFAULT_SCORING_CONFIG: Lazy<ScoringConfig> = Lazy::new(|| ScoringConfig {
    id: None,
    name: "default".to_string(),
    is_active: true,
    organization_id: None,
    telefone_score: 10,
    email_score: 10,
    empresa_score: 15,
    cargo_score: 10,
    temperatura_elite_score: Some(20),
    temperatura_quente_score: 20,
    temperatura_morno_score: Some(10),
    temperatura_frio_score: Some(0),
    nivel_interesse_alto_score: 15,
    nivel_interesse_medio_score: Some(10),
    nivel_interesse_baixo_score: Some(5),
    orcamento_disponivel_score: 10,
    decisor_principal_score: 10,
    dor_principal_score: 10,
    low_score_threshold: 60,
    high_score_closer_id: None,
    low_score_closer_id: None,
});

/// Resultado da avaliação: total e detalhamento ordenado por campo
#[derive(Debug, Clone)]
pub struct ScoreEvaluation {
    pub total: i32,
    pub details: Vec<ScoreDetail>,
}

/// Avalia os campos submetidos contra a configuração de pontuação
///
/// Ordem fixa de verificação: telefone, email, empresa, cargo,
/// temperatura, nível de interesse, orçamento, decisor, dor. Campos
/// ausentes ou em branco não pontuam e ficam fora do detalhamento;
/// categorias reconhecidas entram no detalhamento mesmo quando a banda
/// vale zero pontos.
pub fn evaluate(request: &QualificationRequest, config: &ScoringConfig) -> ScoreEvaluation {
    let mut total = 0;
    let mut details = Vec::new();

    let mut add = |field: &str, score: i32| {
        total += score;
        details.push(ScoreDetail {
            field: field.to_string(),
            score,
        });
    };

    if has_text(&request.telefone) {
        add("telefone", config.telefone_score);
    }
    if has_text(&request.email) {
        add("email", config.email_score);
    }
    if has_text(&request.empresa) {
        add("empresa", config.empresa_score);
    }
    if has_text(&request.cargo) {
        add("cargo", config.cargo_score);
    }

    if let Some(raw) = request.temperatura.as_deref().filter(|s| !s.trim().is_empty()) {
        match Temperatura::from_raw(raw) {
            Temperatura::Elite => {
                add("temperatura_elite", config.temperatura_elite_score.unwrap_or(0))
            }
            Temperatura::Quente => add("temperatura_quente", config.temperatura_quente_score),
            Temperatura::Morno => {
                add("temperatura_morno", config.temperatura_morno_score.unwrap_or(0))
            }
            Temperatura::Frio => {
                add("temperatura_frio", config.temperatura_frio_score.unwrap_or(0))
            }
        }
    }

    if let Some(raw) = request.nivel_interesse.as_ref() {
        let label = raw.as_label();
        if !label.is_empty() {
            match NivelInteresse::from_raw(&label) {
                NivelInteresse::Alto => {
                    add("nivel_interesse_alto", config.nivel_interesse_alto_score)
                }
                NivelInteresse::Medio => add(
                    "nivel_interesse_medio",
                    config.nivel_interesse_medio_score.unwrap_or(0),
                ),
                NivelInteresse::Baixo => add(
                    "nivel_interesse_baixo",
                    config.nivel_interesse_baixo_score.unwrap_or(0),
                ),
            }
        }
    }

    if request.orcamento_disponivel.unwrap_or(0.0) > 0.0 {
        add("orcamento_disponivel", config.orcamento_disponivel_score);
    }
    if request.decisor_principal.unwrap_or(false) {
        add("decisor_principal", config.decisor_principal_score);
    }
    if has_text(&request.dor_principal) {
        add("dor_principal", config.dor_principal_score);
    }

    ScoreEvaluation { total, details }
}

/// Classifica o total contra o threshold da configuração
///
/// Empate resolve para o segmento alto: o limite inferior do segmento
/// high é inclusivo.
pub fn classify(total_score: i32, threshold: i32) -> ScoreSegment {
    if total_score >= threshold {
        ScoreSegment::HighScore
    } else {
        ScoreSegment::LowScore
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}
