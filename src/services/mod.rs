pub mod agendamento;
pub mod closer_resolver;
pub mod datastore;
pub mod lead_writer;
pub mod qualificacao;
pub mod scoring;

pub use datastore::Datastore;
pub use qualificacao::{QualificationError, QualificationService};
