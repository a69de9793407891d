//! Cliente Supabase (PostgREST) para o motor de qualificação de leads
//!
//! Crate local, não publicado: cobre só as operações que o serviço
//! realmente consome e mantém controle total sobre headers e filtros.

pub mod client;
pub mod error;

pub use client::SupabaseClient;
pub use error::{Result, SupabaseError};
