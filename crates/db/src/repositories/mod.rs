use async_trait::async_trait;
use thiserror::Error;

use deckhand_core::domain::{NewProposalRecord, ProposalRecord};

pub mod memory;
pub mod proposal_log;

pub use memory::InMemoryProposalLogRepository;
pub use proposal_log::SqlProposalLogRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Append-only history of generated proposals.
#[async_trait]
pub trait ProposalLogRepository: Send + Sync {
    /// Append one row and return it as persisted, id and timestamp included.
    async fn record(&self, record: NewProposalRecord) -> Result<ProposalRecord, RepositoryError>;

    /// Most recent rows, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<ProposalRecord>, RepositoryError>;
}
