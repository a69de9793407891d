use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::scoring::{ScoreDetail, ScoreSegment};

/// Requisição de qualificação submetida pelo formulário público
///
/// Aceita os nomes de campo do formulário original em português e os
/// equivalentes em inglês via alias. A validação de obrigatórios
/// (nome/email/telefone) acontece no orquestrador, não no parse.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct QualificationRequest {
    #[serde(default, alias = "name")]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phone")]
    pub telefone: Option<String>,
    #[serde(default, alias = "company")]
    pub empresa: Option<String>,
    #[serde(default, alias = "role")]
    pub cargo: Option<String>,
    #[serde(default, alias = "temperature_self_report")]
    pub temperatura: Option<String>,
    #[serde(default, alias = "interest_level")]
    pub nivel_interesse: Option<NivelInteresseRaw>,
    #[serde(default, alias = "budget_available")]
    pub orcamento_disponivel: Option<f64>,
    #[serde(default, alias = "is_decision_maker")]
    pub decisor_principal: Option<bool>,
    #[serde(default, alias = "stated_pain_point")]
    pub dor_principal: Option<String>,
    #[serde(default)]
    pub preferred_datetime: Option<String>,
    #[serde(default, alias = "tenant_id")]
    pub organization_id: Option<Uuid>,
}

/// Nível de interesse como chega no corpo: número ou texto
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum NivelInteresseRaw {
    Numero(i64),
    Texto(String),
}

impl NivelInteresseRaw {
    /// Rótulo canônico usado na normalização e na persistência
    pub fn as_label(&self) -> String {
        match self {
            NivelInteresseRaw::Numero(n) => n.to_string(),
            NivelInteresseRaw::Texto(s) => s.trim().to_string(),
        }
    }
}

/// Bloco `score_result` da resposta
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreResultPayload {
    pub total_score: i32,
    pub threshold: i32,
    pub config_used: String,
    pub details: Vec<ScoreDetail>,
}

/// Bloco `assignment_result` da resposta
///
/// `success: false` aqui é falha suave: o lead foi criado e pontuado, só a
/// atribuição ficou pendente, com o motivo explícito em `reason`.
#[derive(Debug, Serialize, Clone)]
pub struct AssignmentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_type: Option<ScoreSegment>,
    pub reason: String,
}

impl AssignmentResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            closer_id: None,
            closer_name: None,
            assignment_type: None,
            reason: reason.into(),
        }
    }
}

/// Bloco `appointment_result` da resposta
#[derive(Debug, Serialize, Clone, Default)]
pub struct AppointmentResult {
    pub appointment_scheduled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_link: Option<String>,
}

/// Resultado estruturado de uma qualificação bem-sucedida
#[derive(Debug, Serialize, Clone)]
pub struct QualificationOutcome {
    pub success: bool,
    pub lead_id: Uuid,
    pub score_result: ScoreResultPayload,
    pub assignment_result: AssignmentResult,
    pub appointment_result: AppointmentResult,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_aceita_campos_em_ingles_via_alias() {
        let body = r#"{
            "name": "Ana",
            "email": "ana@x.com",
            "phone": "11999999999",
            "temperature_self_report": "quente",
            "interest_level": 3,
            "is_decision_maker": true
        }"#;

        let request: QualificationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.nome_completo.as_deref(), Some("Ana"));
        assert_eq!(request.telefone.as_deref(), Some("11999999999"));
        assert_eq!(request.temperatura.as_deref(), Some("quente"));
        assert_eq!(request.decisor_principal, Some(true));
        assert_eq!(
            request.nivel_interesse.unwrap().as_label(),
            "3".to_string()
        );
    }

    #[test]
    fn test_nivel_interesse_aceita_numero_ou_texto() {
        let numerico: QualificationRequest =
            serde_json::from_str(r#"{"nivel_interesse": 2}"#).unwrap();
        assert_eq!(numerico.nivel_interesse.unwrap().as_label(), "2");

        let textual: QualificationRequest =
            serde_json::from_str(r#"{"nivel_interesse": "alto"}"#).unwrap();
        assert_eq!(textual.nivel_interesse.unwrap().as_label(), "alto");
    }

    #[test]
    fn test_campos_ausentes_viram_none() {
        let request: QualificationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.nome_completo.is_none());
        assert!(request.organization_id.is_none());
        assert!(request.preferred_datetime.is_none());
    }
}
