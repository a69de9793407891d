//! Cliente HTTP para a interface REST do Supabase (PostgREST)
//!
//! O motor de qualificação só consome três operações do banco hospedado:
//! lookup filtrado retornando no máximo uma linha, insert retornando a linha
//! criada e update por filtro. Este cliente expõe exatamente essas três,
//! mais um ping de conectividade para os health checks.

use crate::error::{Result, SupabaseError};
use reqwest::{Client as HttpClient, Response};
use serde_json::Value;
use std::time::Duration;

/// Cliente para uma instância Supabase
///
/// Cada instância carrega uma única credencial. O serviço cria duas:
/// uma com a anon key (caminho restrito, sujeito a RLS) e uma com a
/// service role key (caminho confiável, ignora RLS).
#[derive(Clone)]
pub struct SupabaseClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Cria um novo cliente Supabase
    ///
    /// # Argumentos
    ///
    /// * `base_url` - URL do projeto (ex.: `https://xyz.supabase.co`)
    /// * `api_key` - anon key ou service role key
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| SupabaseError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(SupabaseError::ConfigError("Supabase base_url is empty".to_string()));
        }

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Busca no máximo uma linha de `table` aplicando filtros de igualdade
    ///
    /// Gera `GET /rest/v1/{table}?select=*&{col}=eq.{valor}&limit=1`.
    /// Ausência de linha não é erro: retorna `Ok(None)`.
    pub async fn select_one(&self, table: &str, filters: &[(&str, String)]) -> Result<Option<Value>> {
        let url = format!("{}?select=*{}&limit=1", self.table_url(table), query_filters(filters));

        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let mut rows: Vec<Value> = response.json().await?;

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Insere uma linha em `table` e retorna a linha criada
    ///
    /// Usa `Prefer: return=representation` para receber a linha com os
    /// campos preenchidos pelo banco (id, created_at).
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value> {
        let url = self.table_url(table);

        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let mut rows: Vec<Value> = response.json().await?;

        if rows.is_empty() {
            return Err(SupabaseError::NotFound(format!(
                "insert into '{}' returned no representation",
                table
            )));
        }
        Ok(rows.remove(0))
    }

    /// Atualiza linhas de `table` que casam com os filtros de igualdade
    pub async fn update(&self, table: &str, filters: &[(&str, String)], patch: &Value) -> Result<()> {
        let url = format!(
            "{}?{}",
            self.table_url(table),
            query_filters(filters).trim_start_matches('&')
        );

        tracing::debug!("PATCH {}", url);

        let response = self
            .http_client
            .patch(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        self.handle_response(response).await?;
        Ok(())
    }

    /// Testa a conectividade com a interface REST
    pub async fn test_connection(&self) -> Result<()> {
        let url = format!("{}/rest/v1/", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        self.handle_response(response).await?;
        Ok(())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Converte respostas não-2xx em `SupabaseError::ApiError`
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        tracing::warn!("Supabase API error (status {}): {}", status.as_u16(), message);

        Err(SupabaseError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Monta a cauda de query string com filtros `col=eq.valor`
fn query_filters(filters: &[(&str, String)]) -> String {
    let mut out = String::new();
    for (column, value) in filters {
        out.push('&');
        out.push_str(column);
        out.push_str("=eq.");
        out.push_str(&urlencoding::encode(value));
    }
    out
}
