use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload de insert na tabela `agendamento_links`
///
/// O token é único por constraint no banco; o motor nunca atualiza ou
/// consome links depois de criados (o fluxo público de booking faz isso).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NovoAgendamentoLink {
    pub token_link: String,
    pub lead_id: Uuid,
    pub closer_id: Uuid,
    pub tipo_call_permitido: String,
    pub titulo_personalizado: String,
    pub descricao_personalizada: String,
    pub cor_tema: String,
    pub ativo: bool,
    pub uso_unico: bool,
    pub organization_id: Uuid,
}
