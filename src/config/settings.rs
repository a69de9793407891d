use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    pub booking: BookingSettings,
    pub admin: Option<AdminSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,  // caminho restrito (sujeito a RLS)
    pub service_role_key: String,  // caminho confiável (ignora RLS)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookingSettings {
    pub base_url: String,  // base da URL pública de agendamento
    pub default_organization_id: Uuid,  // tenant usado quando o formulário não envia um
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminSettings {
    pub api_key: Option<String>,  // protege os endpoints /admin/*
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Segredos vêm de variáveis de ambiente, nunca dos arquivos
        if let Ok(url) = std::env::var("SUPABASE_URL") {
            builder = builder.set_override("supabase.url", url)?;
        }
        if let Ok(anon_key) = std::env::var("SUPABASE_ANON_KEY") {
            builder = builder.set_override("supabase.anon_key", anon_key)?;
        }
        if let Ok(service_key) = std::env::var("SUPABASE_SERVICE_ROLE_KEY") {
            builder = builder.set_override("supabase.service_role_key", service_key)?;
        }
        if let Ok(base_url) = std::env::var("BOOKING_BASE_URL") {
            builder = builder.set_override("booking.base_url", base_url)?;
        }
        if let Ok(admin_key) = std::env::var("ADMIN_API_KEY") {
            builder = builder.set_override("admin.api_key", admin_key)?;
        }

        builder = builder.add_source(Environment::with_prefix("CSSYSTEM"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
