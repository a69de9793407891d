pub mod agendamento;
pub mod closer;
pub mod lead;
pub mod qualificacao;
pub mod scoring;

pub use agendamento::*;
pub use closer::*;
pub use lead::*;
pub use qualificacao::*;
pub use scoring::*;
