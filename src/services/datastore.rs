//! Seam de acesso a dados do motor de qualificação
//!
//! O motor consome exatamente três operações do banco hospedado: lookup
//! filtrado retornando no máximo uma linha, insert retornando a linha
//! criada e update por filtro. O trait existe para que o orquestrador
//! receba handles explícitos (restrito e confiável) em vez de alcançar um
//! cliente global, e para que os testes usem um store em memória.

use async_trait::async_trait;
use serde_json::Value;
use supabase::{SupabaseClient, SupabaseError};

#[async_trait]
pub trait Datastore: Send + Sync {
    /// Busca no máximo uma linha de `table` casando todos os filtros de igualdade
    async fn select_one(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<Value>, SupabaseError>;

    /// Insere uma linha e retorna a representação criada pelo banco
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, SupabaseError>;

    /// Atualiza as linhas que casam com os filtros de igualdade
    async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &Value,
    ) -> Result<(), SupabaseError>;
}

#[async_trait]
impl Datastore for SupabaseClient {
    async fn select_one(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<Value>, SupabaseError> {
        SupabaseClient::select_one(self, table, filters).await
    }

    async fn insert(&self, table: &str, row: &Value) -> Result<Value, SupabaseError> {
        SupabaseClient::insert(self, table, row).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &Value,
    ) -> Result<(), SupabaseError> {
        SupabaseClient::update(self, table, filters, patch).await
    }
}

#[cfg(test)]
pub mod memoria {
    //! Datastore em memória para os testes do motor

    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Implementação em memória do [`Datastore`]
    ///
    /// Linhas são `serde_json::Value`; inserts sem `id` ganham um uuid.
    /// Tabelas marcadas com `fail_writes_on` devolvem erro em insert e
    /// update, para exercitar os caminhos best-effort do orquestrador.
    #[derive(Default)]
    pub struct MemoryDatastore {
        tables: Mutex<HashMap<String, Vec<Value>>>,
        failing: Mutex<HashSet<String>>,
    }

    impl MemoryDatastore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, table: &str, rows: Vec<Value>) {
            self.tables
                .lock()
                .unwrap()
                .entry(table.to_string())
                .or_default()
                .extend(rows);
        }

        pub fn fail_writes_on(&self, table: &str) {
            self.failing.lock().unwrap().insert(table.to_string());
        }

        pub fn rows(&self, table: &str) -> Vec<Value> {
            self.tables
                .lock()
                .unwrap()
                .get(table)
                .cloned()
                .unwrap_or_default()
        }

        fn injected_failure(&self, table: &str) -> Option<SupabaseError> {
            if self.failing.lock().unwrap().contains(table) {
                Some(SupabaseError::ApiError {
                    status: 500,
                    message: format!("injected failure on '{}'", table),
                })
            } else {
                None
            }
        }
    }

    fn matches_filters(row: &Value, filters: &[(&str, String)]) -> bool {
        filters.iter().all(|(column, expected)| match &row[*column] {
            Value::String(s) => s == expected,
            Value::Bool(b) => b.to_string() == *expected,
            Value::Number(n) => n.to_string() == *expected,
            _ => false,
        })
    }

    #[async_trait]
    impl Datastore for MemoryDatastore {
        async fn select_one(
            &self,
            table: &str,
            filters: &[(&str, String)],
        ) -> Result<Option<Value>, SupabaseError> {
            let tables = self.tables.lock().unwrap();
            let row = tables
                .get(table)
                .and_then(|rows| rows.iter().find(|row| matches_filters(row, filters)))
                .cloned();
            Ok(row)
        }

        async fn insert(&self, table: &str, row: &Value) -> Result<Value, SupabaseError> {
            if let Some(err) = self.injected_failure(table) {
                return Err(err);
            }

            let mut stored = row.clone();
            if stored.get("id").is_none() {
                stored["id"] = Value::String(Uuid::new_v4().to_string());
            }

            self.tables
                .lock()
                .unwrap()
                .entry(table.to_string())
                .or_default()
                .push(stored.clone());

            Ok(stored)
        }

        async fn update(
            &self,
            table: &str,
            filters: &[(&str, String)],
            patch: &Value,
        ) -> Result<(), SupabaseError> {
            if let Some(err) = self.injected_failure(table) {
                return Err(err);
            }

            let mut tables = self.tables.lock().unwrap();
            if let Some(rows) = tables.get_mut(table) {
                for row in rows.iter_mut().filter(|row| matches_filters(row, filters)) {
                    if let Some(fields) = patch.as_object() {
                        for (key, value) in fields {
                            row[key.as_str()] = value.clone();
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryDatastore::new();

        let created = store
            .insert("leads", &serde_json::json!({"nome_completo": "Ana"}))
            .await
            .unwrap();
        assert!(created["id"].is_string());

        let id = created["id"].as_str().unwrap().to_string();
        store
            .update(
                "leads",
                &[("id", id.clone())],
                &serde_json::json!({"lead_score": 42}),
            )
            .await
            .unwrap();

        let row = store
            .select_one("leads", &[("id", id)])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["lead_score"], 42);
    }
}
