//! Orquestrador da qualificação de leads
//!
//! Sequência linear, sem fan-out: validar entrada → criar lead → carregar
//! configuração ativa (ou fallback) → avaliar score → classificar →
//! resolver closer → gravar atribuição → provisionar link → resultado
//! estruturado. Só a validação e a criação do lead são terminais; todo o
//! resto é best-effort e aparece na resposta com motivo explícito.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::BookingSettings;
use crate::models::{
    AppointmentResult, AssignmentResult, Closer, Lead, NovoLead, QualificationOutcome,
    QualificationRequest, ScoreResultPayload, ScoringConfig,
};
use crate::services::agendamento;
use crate::services::closer_resolver::{self, CloserResolution};
use crate::services::datastore::Datastore;
use crate::services::lead_writer;
use crate::services::scoring::{self, DEFAULT_SCORING_CONFIG};
use crate::utils::logging::*;

/// Falhas terminais da qualificação
///
/// Tudo que não está aqui é falha suave e vira campo na resposta.
#[derive(Debug, Error)]
pub enum QualificationError {
    /// Campo obrigatório ausente; nenhum lead é criado
    #[error("{0}")]
    Validation(String),

    /// Insert do lead falhou; o workflow aborta sem escritas parciais
    #[error("Erro ao criar lead: {0}")]
    Persistence(String),
}

/// Serviço de qualificação com os dois handles de acesso a dados
///
/// `restricted` opera com a credencial anônima do submitter (criação do
/// lead, leitura de configuração); `trusted` opera com a credencial de
/// serviço (consulta de closers, escrita de atribuição, links), porque o
/// submitter não é o dono do lead.
pub struct QualificationService {
    restricted: Arc<dyn Datastore>,
    trusted: Arc<dyn Datastore>,
    booking: BookingSettings,
}

impl QualificationService {
    pub fn new(
        restricted: Arc<dyn Datastore>,
        trusted: Arc<dyn Datastore>,
        booking: BookingSettings,
    ) -> Self {
        Self {
            restricted,
            trusted,
            booking,
        }
    }

    /// Executa o workflow completo de qualificação
    pub async fn qualify(
        &self,
        request: QualificationRequest,
    ) -> Result<QualificationOutcome, QualificationError> {
        // Received → Validated
        let (nome_completo, email, telefone) = validate_required(&request)?;
        let organization_id = request
            .organization_id
            .unwrap_or(self.booking.default_organization_id);

        log_info(&format!(
            "🎯 Processing lead qualification: {} <{}> (org: {})",
            nome_completo, email, organization_id
        ));

        // Validated → LeadPersisted
        let lead = self
            .create_lead(&request, &nome_completo, &email, &telefone, organization_id)
            .await?;
        log_lead_created(lead.id);

        // LeadPersisted → Scored (ausência de configuração nunca falha)
        let (config, config_used) = self.active_config(organization_id).await;
        let evaluation = scoring::evaluate(&request, &config);

        // Scored → Classified
        let segment = scoring::classify(evaluation.total, config.low_score_threshold);
        log_score_calculated(lead.id, evaluation.total, config.low_score_threshold);

        // Gravação do score é best-effort: o lead existe e a resposta
        // carrega o score mesmo se o update falhar
        lead_writer::write_score(self.trusted.as_ref(), lead.id, &evaluation).await;

        // Classified → CloserResolved → AssignmentWritten
        let resolution =
            closer_resolver::resolve_closer(self.trusted.as_ref(), segment, &config, organization_id)
                .await;

        let (assignment, assigned_closer): (AssignmentResult, Option<Closer>) = match resolution {
            CloserResolution::Resolved(closer) => {
                match lead_writer::assign_closer(self.trusted.as_ref(), lead.id, closer.id).await {
                    Ok(()) => {
                        log_closer_assigned(lead.id, &closer.nome_completo);
                        let assignment = AssignmentResult {
                            success: true,
                            closer_id: Some(closer.id),
                            closer_name: Some(closer.nome_completo.clone()),
                            assignment_type: Some(segment),
                            reason: format!(
                                "Score {} → {} closer ({})",
                                evaluation.total,
                                segment.as_str(),
                                closer.nome_completo
                            ),
                        };
                        (assignment, Some(closer))
                    }
                    Err(e) => {
                        log_error(&format!(
                            "❌ Erro ao atribuir closer ao lead {}: {}",
                            lead.id, e
                        ));
                        (
                            AssignmentResult::failed(format!("Error assigning closer: {}", e)),
                            None,
                        )
                    }
                }
            }
            CloserResolution::Unresolved { reason } => (AssignmentResult::failed(reason), None),
        };

        // AssignmentWritten → LinkProvisioned (pulado sem closer atribuído)
        let appointment = match &assigned_closer {
            Some(closer) => {
                agendamento::provision_link(
                    self.trusted.as_ref(),
                    lead.id,
                    closer.id,
                    organization_id,
                    &nome_completo,
                    request.preferred_datetime.as_deref(),
                    &self.booking.base_url,
                )
                .await
            }
            None => AppointmentResult::default(),
        };

        // Completed
        Ok(QualificationOutcome {
            success: true,
            lead_id: lead.id,
            score_result: ScoreResultPayload {
                total_score: evaluation.total,
                threshold: config.low_score_threshold,
                config_used,
                details: evaluation.details,
            },
            assignment_result: assignment,
            appointment_result: appointment,
            message: "Lead qualified and processed successfully".to_string(),
        })
    }

    /// Carrega a configuração ativa do tenant, ou o fallback embutido
    ///
    /// Qualquer problema aqui (linha ausente, linha inválida, banco fora)
    /// degrada para a regra default em vez de falhar a qualificação.
    pub async fn active_config(&self, organization_id: Uuid) -> (ScoringConfig, String) {
        let filters = [
            ("organization_id", organization_id.to_string()),
            ("is_active", "true".to_string()),
        ];

        match self
            .restricted
            .select_one("scoring_configurations", &filters)
            .await
        {
            Ok(Some(row)) => match serde_json::from_value::<ScoringConfig>(row) {
                Ok(config) => {
                    let name = config.name.clone();
                    (config, name)
                }
                Err(e) => {
                    log_warning(&format!(
                        "⚠️ Configuração de scoring inválida para {}: {}. Usando default.",
                        organization_id, e
                    ));
                    (DEFAULT_SCORING_CONFIG.clone(), "default".to_string())
                }
            },
            Ok(None) => {
                log_warning(&format!(
                    "⚠️ Nenhuma configuração de scoring ativa para {}. Usando default.",
                    organization_id
                ));
                (DEFAULT_SCORING_CONFIG.clone(), "default".to_string())
            }
            Err(e) => {
                log_warning(&format!(
                    "⚠️ Erro ao carregar configuração de scoring: {}. Usando default.",
                    e
                ));
                (DEFAULT_SCORING_CONFIG.clone(), "default".to_string())
            }
        }
    }

    async fn create_lead(
        &self,
        request: &QualificationRequest,
        nome_completo: &str,
        email: &str,
        telefone: &str,
        organization_id: Uuid,
    ) -> Result<Lead, QualificationError> {
        let novo = NovoLead {
            nome_completo: nome_completo.to_string(),
            email: email.to_string(),
            telefone: telefone.to_string(),
            empresa: request.empresa.clone(),
            cargo: request.cargo.clone(),
            temperatura: request
                .temperatura
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "morno".to_string()),
            nivel_interesse: request
                .nivel_interesse
                .as_ref()
                .map(|n| n.as_label())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "2".to_string()),
            orcamento_disponivel: request.orcamento_disponivel.unwrap_or(0.0),
            decisor_principal: request.decisor_principal.unwrap_or(false),
            dor_principal: request.dor_principal.clone(),
            organization_id,
            origem: "formulario_qualificacao_v2".to_string(),
            status: "agendado".to_string(),
            data_primeiro_contato: Utc::now(),
        };

        let row = serde_json::to_value(&novo)
            .map_err(|e| QualificationError::Persistence(e.to_string()))?;

        let created = self
            .restricted
            .insert("leads", &row)
            .await
            .map_err(|e| QualificationError::Persistence(e.to_string()))?;

        serde_json::from_value::<Lead>(created)
            .map_err(|e| QualificationError::Persistence(format!("invalid lead row: {}", e)))
    }
}

fn validate_required(
    request: &QualificationRequest,
) -> Result<(String, String, String), QualificationError> {
    let nome = non_blank(&request.nome_completo);
    let email = non_blank(&request.email);
    let telefone = non_blank(&request.telefone);

    match (nome, email, telefone) {
        (Some(nome), Some(email), Some(telefone)) => Ok((nome, email, telefone)),
        _ => {
            log_validation_error("required", "nome/email/telefone ausentes");
            Err(QualificationError::Validation(
                "Nome, email e telefone são obrigatórios".to_string(),
            ))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
