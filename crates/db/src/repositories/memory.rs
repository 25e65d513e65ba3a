use chrono::Utc;
use tokio::sync::RwLock;

use deckhand_core::domain::{NewProposalRecord, ProposalRecord};

use super::{ProposalLogRepository, RepositoryError};

/// Vec-backed stand-in for tests and offline runs. Rows live newest-last,
/// mirroring insertion order in the SQL table.
#[derive(Default)]
pub struct InMemoryProposalLogRepository {
    rows: RwLock<Vec<ProposalRecord>>,
}

#[async_trait::async_trait]
impl ProposalLogRepository for InMemoryProposalLogRepository {
    async fn record(&self, record: NewProposalRecord) -> Result<ProposalRecord, RepositoryError> {
        let mut rows = self.rows.write().await;
        let stored = ProposalRecord {
            id: rows.len() as i64 + 1,
            submitted_by: record.submitted_by,
            client_name: record.client_name,
            generated_at: Utc::now(),
            location: record.location,
            package_type: record.package_type,
            options: record.options,
            total_amount: record.total_amount,
            correlation_id: record.correlation_id,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ProposalRecord>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().rev().take(limit.max(0) as usize).cloned().collect())
    }
}
