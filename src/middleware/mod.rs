/// Middleware layer para o Axum router
///
/// Autenticação dos endpoints administrativos do serviço.

pub mod admin_auth;

pub use admin_auth::require_admin_key;
