// Biblioteca do serviço de qualificação de leads
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub supabase: supabase::SupabaseClient,  // caminho restrito, usado nos health checks
    pub qualificacao: Arc<services::QualificationService>,
}
