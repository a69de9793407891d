use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Linha da tabela `closers` (somente leitura para o motor)
///
/// Apenas closers com `ativo = true` e `organization_id` igual ao do lead
/// são elegíveis para atribuição.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Closer {
    pub id: Uuid,
    pub nome_completo: String,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}
