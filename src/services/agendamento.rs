//! Provisionamento de links de agendamento
//!
//! Gera um token aleatório com componente temporal, persiste a linha em
//! `agendamento_links` pelo handle confiável e monta a URL pública de
//! booking. A unicidade final do token é garantida pela constraint do
//! banco, não pelo gerador. Tudo aqui é best-effort: falha de insert
//! derruba só o link, nunca a qualificação.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

use crate::models::{AppointmentResult, NovoAgendamentoLink};
use crate::services::datastore::Datastore;
use crate::utils::logging::*;

const TIPO_CALL_VENDAS: &str = "vendas";
const COR_TEMA_PADRAO: &str = "#3b82f6";
const TOKEN_RANDOM_LEN: usize = 9;

/// Gera um token de agendamento: prefixo + aleatório curto + tempo em base 36
pub fn generate_token(prefix: &str) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    format!(
        "{}-{}{}",
        prefix,
        random,
        to_base36(Utc::now().timestamp_millis() as u64)
    )
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn booking_url(base_url: &str, token: &str) -> String {
    format!("{}/agendar/{}", base_url.trim_end_matches('/'), token)
}

/// Provisiona o link de agendamento do lead recém-atribuído
///
/// Com `preferred_datetime` presente, tenta primeiro um link dedicado de
/// uso único (prefixo `qual-`). Sem horário preferido, ou se o insert
/// dedicado falhar, cai para um link genérico reutilizável (prefixo
/// `lead-`) que serve como booking geral do lead.
pub async fn provision_link(
    trusted: &dyn Datastore,
    lead_id: Uuid,
    closer_id: Uuid,
    organization_id: Uuid,
    nome_completo: &str,
    preferred_datetime: Option<&str>,
    base_url: &str,
) -> AppointmentResult {
    let mut result = AppointmentResult::default();

    if let Some(datetime) = preferred_datetime {
        let token = generate_token("qual");
        let link = NovoAgendamentoLink {
            token_link: token.clone(),
            lead_id,
            closer_id,
            tipo_call_permitido: TIPO_CALL_VENDAS.to_string(),
            titulo_personalizado: format!("Agendamento - {}", nome_completo),
            descricao_personalizada: format!(
                "Olá {}! Agendamento automático baseado na sua qualificação.",
                nome_completo
            ),
            cor_tema: COR_TEMA_PADRAO.to_string(),
            ativo: true,
            uso_unico: true,
            organization_id,
        };

        match insert_link(trusted, &link).await {
            Ok(()) => {
                let url = booking_url(base_url, &token);
                log_link_provisioned(lead_id, &url);
                result = AppointmentResult {
                    appointment_scheduled: true,
                    appointment_token: Some(token),
                    scheduled_date: Some(datetime.to_string()),
                    closer_id: Some(closer_id),
                    appointment_link: Some(url),
                };
            }
            Err(e) => {
                log_warning(&format!(
                    "⚠️ Falha ao criar link dedicado para o lead {}: {}",
                    lead_id, e
                ));
            }
        }
    }

    if result.appointment_link.is_none() {
        let token = generate_token("lead");
        let link = NovoAgendamentoLink {
            token_link: token.clone(),
            lead_id,
            closer_id,
            tipo_call_permitido: TIPO_CALL_VENDAS.to_string(),
            titulo_personalizado: format!("Agendamento - {}", nome_completo),
            descricao_personalizada: format!(
                "Olá {}! Link de agendamento baseado na sua qualificação.",
                nome_completo
            ),
            cor_tema: COR_TEMA_PADRAO.to_string(),
            ativo: true,
            uso_unico: false,
            organization_id,
        };

        match insert_link(trusted, &link).await {
            Ok(()) => {
                let url = booking_url(base_url, &token);
                log_link_provisioned(lead_id, &url);
                result.closer_id = Some(closer_id);
                result.appointment_link = Some(url);
            }
            Err(e) => {
                log_warning(&format!(
                    "⚠️ Falha ao criar link genérico para o lead {}: {}",
                    lead_id, e
                ));
            }
        }
    }

    result
}

async fn insert_link(
    trusted: &dyn Datastore,
    link: &NovoAgendamentoLink,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let row = serde_json::to_value(link)?;
    trusted.insert("agendamento_links", &row).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::datastore::memoria::MemoryDatastore;

    #[test]
    fn test_token_carrega_prefixo_e_charset() {
        let token = generate_token("qual");
        assert!(token.starts_with("qual-"));
        assert!(token.len() > "qual-".len() + TOKEN_RANDOM_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_tokens_consecutivos_diferem() {
        assert_ne!(generate_token("lead"), generate_token("lead"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn test_booking_url_nao_duplica_barra() {
        assert_eq!(
            booking_url("https://cssystem.com.br/", "qual-abc"),
            "https://cssystem.com.br/agendar/qual-abc"
        );
    }

    #[tokio::test]
    async fn test_horario_preferido_cria_link_de_uso_unico() {
        let store = MemoryDatastore::new();
        let lead_id = Uuid::new_v4();
        let closer_id = Uuid::new_v4();

        let result = provision_link(
            &store,
            lead_id,
            closer_id,
            Uuid::new_v4(),
            "Ana",
            Some("2026-08-10T14:00:00Z"),
            "https://cssystem.com.br",
        )
        .await;

        assert!(result.appointment_scheduled);
        assert_eq!(result.scheduled_date.as_deref(), Some("2026-08-10T14:00:00Z"));
        let link = result.appointment_link.unwrap();
        assert!(link.contains("/agendar/qual-"));

        let rows = store.rows("agendamento_links");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["uso_unico"], true);
        assert_eq!(rows[0]["lead_id"], lead_id.to_string());
        assert_eq!(rows[0]["tipo_call_permitido"], "vendas");
    }

    #[tokio::test]
    async fn test_sem_horario_preferido_cria_link_reutilizavel() {
        let store = MemoryDatastore::new();

        let result = provision_link(
            &store,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Ana",
            None,
            "https://cssystem.com.br",
        )
        .await;

        assert!(!result.appointment_scheduled);
        assert!(result.appointment_link.unwrap().contains("/agendar/lead-"));

        let rows = store.rows("agendamento_links");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["uso_unico"], false);
    }

    #[tokio::test]
    async fn test_falha_de_insert_resulta_em_sem_link() {
        let store = MemoryDatastore::new();
        store.fail_writes_on("agendamento_links");

        let result = provision_link(
            &store,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Ana",
            Some("2026-08-10T14:00:00Z"),
            "https://cssystem.com.br",
        )
        .await;

        assert!(!result.appointment_scheduled);
        assert!(result.appointment_link.is_none());
        assert!(store.rows("agendamento_links").is_empty());
    }
}
