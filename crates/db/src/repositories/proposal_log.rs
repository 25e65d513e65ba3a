//! Proposal history persistence.
//!
//! Every successful build appends one row; nothing here is ever updated or
//! deleted. Amounts travel as canonical decimal strings and option details as
//! a JSON column, so the table stays readable with plain sqlite tooling.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deckhand_core::domain::{Location, NewProposalRecord, PricedOption, ProposalRecord};
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use super::{ProposalLogRepository, RepositoryError};
use crate::DbPool;

/// SQLite implementation of [`ProposalLogRepository`].
pub struct SqlProposalLogRepository {
    pool: DbPool,
}

impl SqlProposalLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalLogRepository for SqlProposalLogRepository {
    async fn record(&self, record: NewProposalRecord) -> Result<ProposalRecord, RepositoryError> {
        let generated_at = Utc::now();
        let options_json = serde_json::to_string(&record.options)
            .map_err(|e| RepositoryError::Decode(format!("encode options: {e}")))?;

        let result = sqlx::query(
            r#"
            INSERT INTO proposal_log (
                submitted_by, client_name, generated_at, location,
                package_type, options_json, total_amount, correlation_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.submitted_by)
        .bind(&record.client_name)
        .bind(generated_at.to_rfc3339())
        .bind(record.location.slug())
        .bind(&record.package_type)
        .bind(&options_json)
        .bind(record.total_amount.to_string())
        .bind(&record.correlation_id)
        .execute(&self.pool)
        .await?;

        Ok(ProposalRecord {
            id: result.last_insert_rowid(),
            submitted_by: record.submitted_by,
            client_name: record.client_name,
            generated_at,
            location: record.location,
            package_type: record.package_type,
            options: record.options,
            total_amount: record.total_amount,
            correlation_id: record.correlation_id,
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ProposalRecord>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, submitted_by, client_name, generated_at, location,
                package_type, options_json, total_amount, correlation_id
            FROM proposal_log
            ORDER BY generated_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(proposal_record_from_row).collect()
    }
}

// Helper functions for row mapping

fn proposal_record_from_row(row: &SqliteRow) -> Result<ProposalRecord, RepositoryError> {
    let generated_at: String = row.try_get("generated_at")?;
    let location: String = row.try_get("location")?;
    let options_json: String = row.try_get("options_json")?;
    let total_amount: String = row.try_get("total_amount")?;

    Ok(ProposalRecord {
        id: row.try_get("id")?,
        submitted_by: row.try_get("submitted_by")?,
        client_name: row.try_get("client_name")?,
        generated_at: parse_timestamp("generated_at", generated_at)?,
        location: location
            .parse::<Location>()
            .map_err(|_| RepositoryError::Decode(format!("unknown location: {location}")))?,
        package_type: row.try_get("package_type")?,
        options: serde_json::from_str::<Vec<PricedOption>>(&options_json)
            .map_err(|e| RepositoryError::Decode(format!("invalid options_json: {e}")))?,
        total_amount: total_amount
            .parse::<Decimal>()
            .map_err(|e| RepositoryError::Decode(format!("invalid total_amount: {e}")))?,
        correlation_id: row.try_get("correlation_id")?,
    })
}

fn parse_timestamp(column: &str, value: String) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("invalid timestamp in `{column}`: {e}")))
}

#[cfg(test)]
mod tests {
    use deckhand_core::domain::history::PACKAGE_SINGLE;
    use deckhand_core::domain::{Location, NewProposalRecord, PricingOption};
    use rust_decimal::Decimal;

    use super::{ProposalLogRepository, SqlProposalLogRepository};
    use crate::{connect_with_settings, migrations, DbPool};

    #[tokio::test]
    async fn sql_proposal_log_round_trips_a_record() {
        let pool = setup_pool().await;
        let repo = SqlProposalLogRepository::new(pool.clone());

        let options = vec![
            PricingOption::new(2, Decimal::from(2_000_000)).price(),
            PricingOption::new(4, Decimal::from(3_500_000)).price(),
        ];
        let stored = repo
            .record(NewProposalRecord {
                submitted_by: Some("U-123".to_string()),
                client_name: "Acme Motors".to_string(),
                location: Location::Gateway,
                package_type: PACKAGE_SINGLE.to_string(),
                options: options.clone(),
                total_amount: options[0].total,
                correlation_id: Some("corr-log-1".to_string()),
            })
            .await
            .expect("record proposal");

        assert!(stored.id > 0);
        assert_eq!(stored.options, options);

        let recent = repo.recent(10).await.expect("list recent");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0], stored);
        assert_eq!(recent[0].total_amount, Decimal::from(2_100_000));

        pool.close().await;
    }

    #[tokio::test]
    async fn sql_proposal_log_lists_newest_first_and_honours_limit() {
        let pool = setup_pool().await;
        let repo = SqlProposalLogRepository::new(pool.clone());

        for (client, weeks) in [("First Client", 2u32), ("Second Client", 4), ("Third Client", 6)]
        {
            let options = vec![PricingOption::new(weeks, Decimal::from(100_000)).price()];
            repo.record(NewProposalRecord {
                submitted_by: None,
                client_name: client.to_string(),
                location: Location::TripleCrown,
                package_type: PACKAGE_SINGLE.to_string(),
                options: options.clone(),
                total_amount: options[0].total,
                correlation_id: None,
            })
            .await
            .expect("record proposal");
        }

        let recent = repo.recent(2).await.expect("list recent");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].client_name, "Third Client");
        assert_eq!(recent[1].client_name, "Second Client");

        pool.close().await;
    }

    async fn setup_pool() -> DbPool {
        let pool =
            connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect test pool");
        migrations::run_pending(&pool).await.expect("run migrations");
        pool
    }
}
