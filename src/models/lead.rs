use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Linha da tabela `leads` como retornada pelo banco
///
/// Só o `id` é obrigatório na desserialização: a representação devolvida
/// pelo insert pode variar conforme colunas adicionadas por migração.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Lead {
    pub id: Uuid,
    #[serde(default)]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub temperatura: Option<String>,
    #[serde(default)]
    pub nivel_interesse: Option<String>,
    #[serde(default)]
    pub orcamento_disponivel: Option<f64>,
    #[serde(default)]
    pub decisor_principal: Option<bool>,
    #[serde(default)]
    pub dor_principal: Option<String>,
    #[serde(default)]
    pub lead_score: Option<i32>,
    #[serde(default)]
    pub closer_id: Option<Uuid>,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
    #[serde(default)]
    pub origem: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data_primeiro_contato: Option<DateTime<Utc>>,
}

/// Payload de insert na tabela `leads`
///
/// Montado pelo orquestrador a partir da requisição de qualificação, com
/// os mesmos defaults do formulário original (temperatura "morno", nível
/// de interesse "2", orçamento 0).
#[derive(Debug, Serialize, Clone)]
pub struct NovoLead {
    pub nome_completo: String,
    pub email: String,
    pub telefone: String,
    pub empresa: Option<String>,
    pub cargo: Option<String>,
    pub temperatura: String,
    pub nivel_interesse: String,
    pub orcamento_disponivel: f64,
    pub decisor_principal: bool,
    pub dor_principal: Option<String>,
    pub organization_id: Uuid,
    pub origem: String,
    pub status: String,
    pub data_primeiro_contato: DateTime<Utc>,
}
