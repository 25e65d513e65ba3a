use serde::Serialize;

use deckhand_core::config::{AppConfig, LoadOptions};
use deckhand_core::ProposalRecord;
use deckhand_db::{
    connect_with_settings, migrations, ProposalLogRepository, SqlProposalLogRepository,
};

use crate::commands::CommandResult;

/// Lists the most recent proposal log entries, newest first.
pub fn run(limit: i64, options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "history",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "history",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result: Result<Vec<ProposalRecord>, (&'static str, String, u8)> =
        runtime.block_on(async {
            let pool = connect_with_settings(
                &config.database.url,
                config.database.max_connections,
                config.database.timeout_secs,
            )
            .await
            .map_err(|error| {
                ("db_connectivity", format!("failed to connect to database: {error}"), 4)
            })?;

            migrations::run_pending(&pool)
                .await
                .map_err(|error| ("migration", format!("migration failed: {error}"), 5_u8))?;

            let records = SqlProposalLogRepository::new(pool.clone())
                .recent(limit)
                .await
                .map_err(|error| ("persistence", error.to_string(), 4_u8))?;

            pool.close().await;
            Ok(records)
        });

    match result {
        Ok(records) => {
            #[derive(Serialize)]
            struct HistoryOutput {
                command: &'static str,
                count: usize,
                proposals: Vec<ProposalRecord>,
            }

            let payload =
                HistoryOutput { command: "history", count: records.len(), proposals: records };
            let output = serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
                format!(
                    "{{\"command\":\"history\",\"status\":\"error\",\"error\":\"{}\"}}",
                    error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
                )
            });
            CommandResult { exit_code: 0, output }
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("history", error_class, message, exit_code)
        }
    }
}
