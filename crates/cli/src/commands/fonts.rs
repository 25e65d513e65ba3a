use serde::Serialize;

use deckhand_core::config::{AppConfig, LoadOptions};
use deckhand_render::FontInstaller;

use crate::commands::CommandResult;

/// Copies brand fonts from `fonts.source_dir` into the user font directory.
/// Install problems are reported, not fatal; rendering falls back to system
/// fonts either way.
pub fn run(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "fonts",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let Some(source_dir) = &config.fonts.source_dir else {
        return CommandResult::failure(
            "fonts",
            "config_validation",
            "fonts.source_dir is not configured".to_string(),
            2,
        );
    };

    let report = FontInstaller::new(source_dir.as_str()).install();

    #[derive(Serialize)]
    struct FontsOutput {
        command: &'static str,
        source_dir: String,
        target: Option<String>,
        installed: Vec<String>,
        already_present: Vec<String>,
    }

    let payload = FontsOutput {
        command: "fonts",
        source_dir: source_dir.clone(),
        target: report.target.as_ref().map(|path| path.display().to_string()),
        installed: report.installed,
        already_present: report.already_present,
    };

    let output = serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"fonts\",\"status\":\"error\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: 0, output }
}
