use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Contract for the demo rows: what `load` writes and `verify` checks.
const SEED_ROWS: &[SeedRowContract] = &[
    SeedRowContract {
        id: 9001,
        client_name: "Hilltop Beverages",
        location: "gateway",
        total_amount: "2100000",
        correlation_id: "corr-demo-0001",
    },
    SeedRowContract {
        id: 9002,
        client_name: "Meridian Travel",
        location: "landmark",
        total_amount: "472500",
        correlation_id: "corr-demo-0002",
    },
    SeedRowContract {
        id: 9003,
        client_name: "Crescent Telecom",
        location: "triple_crown",
        total_amount: "1312500",
        correlation_id: "corr-demo-0003",
    },
];

/// Deterministic proposal-log fixtures for demos and smoke checks.
///
/// Rows carry fixed high ids, so loading is idempotent and `clean` can
/// remove exactly what was seeded.
pub struct DemoSeedDataset;

impl DemoSeedDataset {
    /// SQL fixture content for the demo rows.
    pub const SQL: &str = include_str!("../../../config/fixtures/demo_proposals.sql");

    /// Load the demo rows into the database.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let rows_seeded = SEED_ROWS
            .iter()
            .map(|row| RowSeedInfo {
                id: row.id,
                client_name: row.client_name,
                location: row.location,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { rows_seeded })
    }

    /// Verify that the demo rows exist and match the contract.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for row in SEED_ROWS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(
                     SELECT 1 FROM proposal_log
                     WHERE id = ?1 AND client_name = ?2 AND location = ?3
                       AND total_amount = ?4 AND correlation_id = ?5
                 )",
            )
            .bind(row.id)
            .bind(row.client_name)
            .bind(row.location)
            .bind(row.total_amount)
            .bind(row.correlation_id)
            .fetch_one(pool)
            .await?;
            checks.push((row.client_name, present == 1));
        }

        let all_present = checks.iter().all(|(_, exists)| *exists);
        Ok(VerificationResult { all_present, checks })
    }

    /// Remove the seeded rows from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let quoted_ids = sql_array_from_ids(SEED_ROWS);
        sqlx::query(&format!("DELETE FROM proposal_log WHERE id IN {quoted_ids}"))
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedRowContract {
    id: i64,
    client_name: &'static str,
    location: &'static str,
    total_amount: &'static str,
    correlation_id: &'static str,
}

fn sql_array_from_ids(rows: &[SeedRowContract]) -> String {
    let quoted = rows.iter().map(|row| row.id.to_string()).collect::<Vec<_>>().join(",");
    format!("({quoted})")
}

#[derive(Debug)]
pub struct SeedResult {
    pub rows_seeded: Vec<RowSeedInfo>,
}

#[derive(Debug)]
pub struct RowSeedInfo {
    pub id: i64,
    pub client_name: &'static str,
    pub location: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use deckhand_core::domain::Location;

    use super::*;
    use crate::repositories::{ProposalLogRepository, SqlProposalLogRepository};
    use crate::{connect_with_settings, migrations};

    #[test]
    fn sql_fixture_is_valid() {
        assert!(!DemoSeedDataset::SQL.is_empty());
    }

    #[tokio::test]
    async fn load_verify_and_reload_are_idempotent() {
        let pool =
            connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect test database");
        migrations::run_pending(&pool).await.expect("run migrations");

        let first = DemoSeedDataset::load(&pool).await.expect("load seed fixtures");
        let first_verification = DemoSeedDataset::verify(&pool).await.expect("verify fixtures");
        assert!(first_verification.all_present);
        assert_eq!(first.rows_seeded.len(), 3);

        let second = DemoSeedDataset::load(&pool).await.expect("reload seed fixtures");
        let second_verification = DemoSeedDataset::verify(&pool).await.expect("re-verify");
        assert!(second_verification.all_present);
        assert_eq!(second.rows_seeded.len(), 3);
        assert_eq!(first_verification.checks, second_verification.checks);

        pool.close().await;
    }

    #[tokio::test]
    async fn seeded_rows_decode_through_the_repository() {
        let pool =
            connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect test database");
        migrations::run_pending(&pool).await.expect("run migrations");

        DemoSeedDataset::load(&pool).await.expect("load seed fixtures");

        let repo = SqlProposalLogRepository::new(pool.clone());
        let recent = repo.recent(10).await.expect("list recent");
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].client_name, "Crescent Telecom");
        assert_eq!(recent[0].location, Location::TripleCrown);
        assert_eq!(recent[0].options.len(), 3);
        assert_eq!(recent[0].total_amount, Decimal::from(1_312_500));

        pool.close().await;
    }

    #[tokio::test]
    async fn clean_removes_exactly_the_seeded_rows() {
        let pool =
            connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect test database");
        migrations::run_pending(&pool).await.expect("run migrations");

        sqlx::query(
            "INSERT INTO proposal_log (
                 submitted_by, client_name, generated_at, location,
                 package_type, options_json, total_amount, correlation_id
             ) VALUES (NULL, 'Organic Client', '2026-04-01T08:00:00+00:00', 'oryx',
                       'single', '[]', '100', NULL)",
        )
        .execute(&pool)
        .await
        .expect("insert organic row");

        DemoSeedDataset::load(&pool).await.expect("load seed fixtures");
        DemoSeedDataset::clean(&pool).await.expect("clean seed fixtures");

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM proposal_log")
            .fetch_one(&pool)
            .await
            .expect("count rows");
        assert_eq!(remaining, 1);

        let verification = DemoSeedDataset::verify(&pool).await.expect("verify after clean");
        assert!(!verification.all_present);

        pool.close().await;
    }
}
