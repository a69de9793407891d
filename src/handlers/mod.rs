pub mod health;
pub mod qualificacao;
pub mod scoring_config;

pub use health::*;
pub use qualificacao::*;
pub use scoring_config::*;
