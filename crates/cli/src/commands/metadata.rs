use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use deckhand_core::config::{AppConfig, LoadOptions};
use deckhand_render::MetadataGenerator;

use crate::commands::CommandResult;

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Roster CSV exported from the sales workbook.
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,
    /// Library directory to write into; defaults to `library.root` from config.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Show what would be written without touching the library.
    #[arg(long)]
    pub dry_run: bool,
}

/// Turns a roster CSV into per-location `metadata.txt` files under the
/// library root. `--dry-run` previews the same parse without writes.
pub fn run(args: MetadataArgs, options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "metadata",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let out_dir =
        args.out_dir.clone().unwrap_or_else(|| PathBuf::from(&config.library.root));
    let generator = MetadataGenerator::new(&out_dir);
    let generated = if args.dry_run {
        generator.preview(&args.input)
    } else {
        generator.generate(&args.input)
    };
    let generated = match generated {
        Ok(generated) => generated,
        Err(error) => {
            return CommandResult::failure("metadata", "roster_input", error.to_string(), 2);
        }
    };

    #[derive(Serialize)]
    struct MetadataRow {
        folder: String,
        display_name: String,
    }

    #[derive(Serialize)]
    struct MetadataOutput {
        command: &'static str,
        dry_run: bool,
        output_dir: String,
        count: usize,
        locations: Vec<MetadataRow>,
    }

    let payload = MetadataOutput {
        command: "metadata",
        dry_run: args.dry_run,
        output_dir: out_dir.display().to_string(),
        count: generated.len(),
        locations: generated
            .into_iter()
            .map(|location| MetadataRow {
                folder: location.folder,
                display_name: location.display_name,
            })
            .collect(),
    };

    let output = serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"metadata\",\"status\":\"error\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: 0, output }
}
