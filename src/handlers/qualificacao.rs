use axum::{
    body::Body,
    extract::{Request, State},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::time::Instant;

use crate::models::QualificationRequest;
use crate::services::QualificationError;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

/// Handler do formulário público de qualificação
///
/// O parse é feito manualmente a partir dos bytes para controlar a
/// resposta de erro: corpo inválido vira 400 com `success: false` em vez
/// do rejection padrão do extractor.
pub async fn handle_qualification(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> AppResult<Json<Value>> {
    let start_time = Instant::now();
    log_request_received("/api/leads/qualification", "POST");

    let body_bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read request body: {}", e)))?;

    let body_str = String::from_utf8(body_bytes.to_vec())
        .map_err(|e| AppError::ValidationError(format!("Invalid UTF-8 in request body: {}", e)))?;

    let payload: QualificationRequest = serde_json::from_str(&body_str).map_err(|e| {
        log_validation_error("payload", &format!("Invalid JSON: {}", e));
        AppError::ValidationError(format!("Invalid JSON payload: {}", e))
    })?;

    let outcome = state.qualificacao.qualify(payload).await.map_err(|e| match e {
        QualificationError::Validation(msg) => AppError::ValidationError(msg),
        QualificationError::Persistence(details) => AppError::PersistenceError(details),
    })?;

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed("/api/leads/qualification", 200, processing_time);

    Ok(Json(serde_json::to_value(&outcome)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdminSettings, BookingSettings, ServerSettings, Settings, SupabaseSettings};
    use crate::services::datastore::memoria::MemoryDatastore;
    use crate::services::QualificationService;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use serde_json::json;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    const ORG: &str = "9c8c0033-15ea-4e33-a55f-28d81a19693b";

    fn settings() -> Settings {
        Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            supabase: SupabaseSettings {
                url: "http://localhost".to_string(),
                anon_key: "anon".to_string(),
                service_role_key: "service".to_string(),
            },
            booking: BookingSettings {
                base_url: "https://cssystem.com.br".to_string(),
                default_organization_id: ORG.parse().unwrap(),
            },
            admin: Some(AdminSettings { api_key: None }),
        }
    }

    fn app(store: Arc<MemoryDatastore>) -> Router {
        let settings = settings();
        let qualificacao = Arc::new(QualificationService::new(
            store.clone(),
            store,
            settings.booking.clone(),
        ));
        let state = Arc::new(AppState {
            settings,
            supabase: supabase::SupabaseClient::new("http://localhost", "anon").unwrap(),
            qualificacao,
        });

        Router::new()
            .route("/api/leads/qualification", post(handle_qualification))
            .with_state(state)
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/leads/qualification")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_qualificacao_retorna_resultado_estruturado() {
        let store = Arc::new(MemoryDatastore::new());
        let high = Uuid::new_v4();
        store.seed(
            "scoring_configurations",
            vec![json!({
                "name": "Config Vendas",
                "is_active": true,
                "organization_id": ORG,
                "telefone_score": 10,
                "email_score": 10,
                "empresa_score": 15,
                "cargo_score": 10,
                "temperatura_quente_score": 20,
                "nivel_interesse_alto_score": 15,
                "orcamento_disponivel_score": 10,
                "decisor_principal_score": 10,
                "dor_principal_score": 10,
                "low_score_threshold": 60,
                "high_score_closer_id": high.to_string()
            })],
        );
        store.seed(
            "closers",
            vec![json!({
                "id": high.to_string(),
                "nome_completo": "Carlos Closer",
                "ativo": true,
                "organization_id": ORG
            })],
        );

        let (status, body) = post_json(
            app(store),
            json!({
                "nome_completo": "Ana",
                "email": "ana@x.com",
                "telefone": "11999999999",
                "temperatura": "quente",
                "nivel_interesse": "3",
                "orcamento_disponivel": 1000,
                "decisor_principal": true,
                "dor_principal": "cash flow"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["score_result"]["total_score"], 85);
        assert_eq!(body["assignment_result"]["success"], true);
        assert_eq!(body["assignment_result"]["closer_name"], "Carlos Closer");
        assert!(body["lead_id"].is_string());
    }

    #[tokio::test]
    async fn test_post_sem_telefone_retorna_400_sem_criar_lead() {
        let store = Arc::new(MemoryDatastore::new());

        let (status, body) = post_json(
            app(store.clone()),
            json!({"nome_completo": "Ana", "email": "ana@x.com"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Nome, email e telefone são obrigatórios");
        assert!(store.rows("leads").is_empty());
    }

    #[tokio::test]
    async fn test_post_com_json_invalido_retorna_400() {
        let store = Arc::new(MemoryDatastore::new());
        let response = app(store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/leads/qualification")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{nao-e-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_com_falha_de_persistencia_retorna_500_com_detalhes() {
        let store = Arc::new(MemoryDatastore::new());
        store.fail_writes_on("leads");

        let (status, body) = post_json(
            app(store),
            json!({
                "nome_completo": "Ana",
                "email": "ana@x.com",
                "telefone": "11999999999"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Erro ao criar lead");
        assert!(body["details"].is_string());
    }
}
