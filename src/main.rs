/// Serviço de qualificação de leads do CS System
///
/// Fluxo por requisição:
/// - Formulário público submete a qualificação
/// - Motor pontua contra a configuração ativa do tenant (ou o default)
/// - Lead é roteado para o closer do segmento (high/low)
/// - Link de agendamento é provisionado para o closer atribuído
///
/// Sem processamento em background, sem fila: cada qualificação é uma
/// sequência síncrona de chamadas ao banco hospedado.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use lead_qualification_service::{
    config::Settings,
    handlers::{
        get_scoring_config, handle_qualification, health_check, ready_check, status_check,
    },
    middleware as app_middleware,
    services::QualificationService,
    utils::{logging::*, AppError},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if let Err(_) = dotenvy::dotenv() {
        // Em produção (Cloud Run), não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Dois clientes Supabase: o restrito opera com a anon key do submitter
    // (sujeito a RLS); o confiável opera com a service role key para as
    // escritas que o submitter anônimo não poderia fazer
    let restricted = supabase::SupabaseClient::new(
        &settings.supabase.url,
        &settings.supabase.anon_key,
    )
    .map_err(|e| AppError::ConfigError(format!("Failed to create restricted client: {}", e)))?;

    let trusted = supabase::SupabaseClient::new(
        &settings.supabase.url,
        &settings.supabase.service_role_key,
    )
    .map_err(|e| AppError::ConfigError(format!("Failed to create trusted client: {}", e)))?;

    log_info("🔑 Supabase clients initialized (restricted + trusted)");

    let qualificacao = Arc::new(QualificationService::new(
        Arc::new(restricted.clone()),
        Arc::new(trusted),
        settings.booking.clone(),
    ));

    // Inicializar estado da aplicação
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        supabase: restricted,
        qualificacao,
    });

    // Configurar rotas base
    let mut app = Router::new()
        // Health checks (públicos)
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))

        // Formulário de qualificação (público - validação própria)
        .route("/api/leads/qualification", post(handle_qualification))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state.clone());

    // Rotas administrativas protegidas com API key
    let admin_routes = Router::new()
        .route("/admin/scoring-config", get(get_scoring_config))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            app_middleware::require_admin_key,
        ))
        .with_state(app_state);

    app = app.merge(admin_routes);

    // Iniciar servidor
    // No Cloud Run, usar a variável de ambiente PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
