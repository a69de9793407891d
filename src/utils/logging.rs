use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Lead qualification service starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_integration_status_check() {
    debug!("Integration status check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_lead_created(lead_id: Uuid) {
    info!("✅ Lead created: {}", lead_id);
}

pub fn log_score_calculated(lead_id: Uuid, total_score: i32, threshold: i32) {
    info!("🧮 Score calculated for lead {}: {} (threshold: {})",
          lead_id, total_score, threshold);
}

pub fn log_closer_assigned(lead_id: Uuid, closer_name: &str) {
    info!("✅ Closer assigned to lead {}: {}", lead_id, closer_name);
}

pub fn log_link_provisioned(lead_id: Uuid, url: &str) {
    info!("🔗 Appointment link provisioned for lead {}: {}", lead_id, url);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
