use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Linha da tabela `scoring_configurations` (somente leitura para o motor)
///
/// As pontuações de banda opcional (elite/morno/frio, médio/baixo) são
/// colunas anuláveis no schema; `None` vale zero na avaliação.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoringConfig {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub organization_id: Option<Uuid>,

    pub telefone_score: i32,
    pub email_score: i32,
    pub empresa_score: i32,
    pub cargo_score: i32,

    #[serde(default)]
    pub temperatura_elite_score: Option<i32>,
    pub temperatura_quente_score: i32,
    #[serde(default)]
    pub temperatura_morno_score: Option<i32>,
    #[serde(default)]
    pub temperatura_frio_score: Option<i32>,

    pub nivel_interesse_alto_score: i32,
    #[serde(default)]
    pub nivel_interesse_medio_score: Option<i32>,
    #[serde(default)]
    pub nivel_interesse_baixo_score: Option<i32>,

    pub orcamento_disponivel_score: i32,
    pub decisor_principal_score: i32,
    pub dor_principal_score: i32,

    pub low_score_threshold: i32,
    #[serde(default)]
    pub high_score_closer_id: Option<Uuid>,
    #[serde(default)]
    pub low_score_closer_id: Option<Uuid>,
}

/// Contribuição de um campo para o score total
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreDetail {
    pub field: String,
    pub score: i32,
}

/// Segmento derivado da comparação score × threshold
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSegment {
    HighScore,
    LowScore,
}

impl ScoreSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSegment::HighScore => "high_score",
            ScoreSegment::LowScore => "low_score",
        }
    }
}

/// Banda de temperatura auto-reportada pelo lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperatura {
    Elite,
    Quente,
    Morno,
    Frio,
}

impl Temperatura {
    /// Tabela de aliases para o rótulo submetido
    ///
    /// Case-insensitive e insensível a acento. Rótulos fora da tabela caem
    /// na banda mais conservadora (Frio).
    pub fn from_raw(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "elite" => Temperatura::Elite,
            "quente" | "hot" => Temperatura::Quente,
            "morno" | "warm" => Temperatura::Morno,
            _ => Temperatura::Frio,
        }
    }
}

/// Nível de interesse declarado pelo lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NivelInteresse {
    Alto,
    Medio,
    Baixo,
}

impl NivelInteresse {
    /// Tabela de aliases: o formulário envia tanto "3" quanto "alto"
    ///
    /// Rótulos fora da tabela caem no nível mais conservador (Baixo).
    pub fn from_raw(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "3" | "alto" | "high" => NivelInteresse::Alto,
            "2" | "medio" | "medium" => NivelInteresse::Medio,
            _ => NivelInteresse::Baixo,
        }
    }
}

fn normalize_label(raw: &str) -> String {
    deunicode(raw).trim().to_lowercase()
}
