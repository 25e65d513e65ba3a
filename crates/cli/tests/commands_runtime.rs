use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use clap::Parser;
use rust_decimal::Decimal;
use serde_json::Value;

use deckhand_cli::commands::{history, migrate, seed};
use deckhand_cli::{run_command, Cli};
use deckhand_core::config::LoadOptions;
use deckhand_core::{Deck, Location, Slide, SlideSize};

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let result = migrate::run(LoadOptions::default());
            assert_eq!(result.exit_code, 0, "expected successful migrate run");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "migrate");
            assert_eq!(payload["status"], "ok");
        },
    );
}

#[test]
fn migrate_returns_config_failure_without_token() {
    with_env(&[], || {
        let result = migrate::run(LoadOptions::default());
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_returns_deterministic_row_summary() {
    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let result = seed::run(LoadOptions::default());
            assert_eq!(result.exit_code, 0, "expected deterministic seed success");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "seed");
            assert_eq!(payload["status"], "ok");

            let message = payload["message"].as_str().unwrap_or("");
            assert!(message.contains("  - 9001: Hilltop Beverages (gateway)"));
            assert!(message.contains("  - 9002: Meridian Travel (landmark)"));
            assert!(message.contains("  - 9003: Crescent Telecom (triple_crown)"));
        },
    );
}

#[test]
fn seed_is_idempotent_across_runs() {
    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let first = seed::run(LoadOptions::default());
            assert_eq!(first.exit_code, 0, "expected first seed invocation success");
            let first_payload = parse_payload(&first.output);
            assert_eq!(first_payload["status"], "ok");

            let second = seed::run(LoadOptions::default());
            assert_eq!(second.exit_code, 0, "expected second seed invocation success");
            let second_payload = parse_payload(&second.output);
            assert_eq!(second_payload["status"], "ok");

            assert_eq!(first_payload["message"], second_payload["message"]);
        },
    );
}

#[test]
fn propose_builds_artifacts_and_logs_the_proposal() {
    let sandbox = tempfile::tempdir().expect("tempdir");
    let library = sandbox.path().join("library");
    write_library(&library);
    let out_dir = sandbox.path().join("out");
    let db_url = format!("sqlite://{}?mode=rwc", sandbox.path().join("deckhand.db").display());
    let library_root = library.display().to_string();

    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", db_url.as_str()),
            ("DECKHAND_LIBRARY_ROOT", library_root.as_str()),
        ],
        || {
            let cli = Cli::try_parse_from([
                "deckhand",
                "propose",
                "--location",
                "gateway",
                "--start-date",
                "2026-09-07",
                "--duration",
                "2",
                "--net-rate",
                "150000",
                "--client",
                "Hilltop Beverages",
                "--submitted-by",
                "U123",
                "--out-dir",
                out_dir.to_str().expect("utf-8 out dir"),
            ])
            .expect("parse propose invocation");

            let result = run_command(cli);
            assert_eq!(result.exit_code, 0, "propose failed: {}", result.output);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "propose");
            assert_eq!(payload["location"], "The Gateway");
            assert_eq!(payload["client"], "Hilltop Beverages");
            assert_eq!(payload["slide_index"], 1);
            assert_eq!(decimal_field(&payload["total_amount"]), Decimal::from(157_500));
            assert_eq!(decimal_field(&payload["options"][0]["vat"]), Decimal::from(7_500));
            assert_eq!(payload["options"][0]["duration_weeks"], 2);
            assert!(payload["log_id"].as_i64().is_some());
            assert!(payload["artifacts"]["pdf"].is_null());
            assert!(payload["slack"]["fallback_text"]
                .as_str()
                .unwrap_or("")
                .contains("Hilltop Beverages"));

            let deck_path = out_dir.join("Gateway_Proposal.deck.json");
            assert!(deck_path.is_file(), "expected {} to exist", deck_path.display());
            assert!(out_dir.join("Gateway_Proposal.html").is_file());

            let written = fs::read(&deck_path).expect("read written deck");
            let deck = Deck::from_json_slice(&written).expect("written deck parses");
            assert_eq!(deck.slide_count(), 3, "proposal slide inserted before the closing one");

            let history = history::run(5, LoadOptions::default());
            assert_eq!(history.exit_code, 0, "history failed: {}", history.output);
            let history_payload = parse_payload(&history.output);
            assert_eq!(history_payload["count"], 1);
            assert_eq!(history_payload["proposals"][0]["client_name"], "Hilltop Beverages");
            assert_eq!(history_payload["proposals"][0]["location"], "gateway");
            assert_eq!(history_payload["proposals"][0]["submitted_by"], "U123");
        },
    );
}

#[test]
fn propose_rejects_a_non_positive_rate() {
    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let cli = Cli::try_parse_from([
                "deckhand",
                "propose",
                "--location",
                "gateway",
                "--start-date",
                "2026-09-07",
                "--duration",
                "2",
                "--net-rate=-100",
                "--client",
                "Hilltop Beverages",
            ])
            .expect("parse propose invocation");

            let result = run_command(cli);
            assert_eq!(result.exit_code, 2, "expected validation failure code");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "propose");
            assert_eq!(payload["status"], "error");
            assert_eq!(payload["error_class"], "validation");
            assert!(payload["message"].as_str().unwrap_or("").contains("correlation_id"));
            assert!(payload["slack"]["blocks"].is_array(), "failure carries a Slack reply");
        },
    );
}

#[test]
fn propose_rejects_an_unknown_location() {
    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let cli = Cli::try_parse_from([
                "deckhand",
                "propose",
                "--location",
                "Gatway Towers",
                "--start-date",
                "2026-09-07",
                "--duration",
                "2",
                "--net-rate",
                "150000",
                "--client",
                "Hilltop Beverages",
            ])
            .expect("parse propose invocation");

            let result = run_command(cli);
            assert_eq!(result.exit_code, 2, "expected validation failure code");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["error_class"], "validation");
            assert!(payload["message"].as_str().unwrap_or("").contains("Gatway Towers"));
        },
    );
}

#[test]
fn locations_lists_the_full_roster() {
    let sandbox = tempfile::tempdir().expect("tempdir");
    let library = sandbox.path().join("library");
    write_library(&library);
    let library_root = library.display().to_string();

    with_env(
        &[
            ("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test"),
            ("DECKHAND_LIBRARY_ROOT", library_root.as_str()),
        ],
        || {
            let cli =
                Cli::try_parse_from(["deckhand", "locations"]).expect("parse locations invocation");
            let result = run_command(cli);
            assert_eq!(result.exit_code, 0, "locations failed: {}", result.output);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "locations");
            assert_eq!(payload["count"], 5);
            assert_eq!(payload["locations"][0]["slug"], "gateway");
            assert_eq!(payload["locations"][0]["display_name"], "The Gateway");
            assert_eq!(payload["slack"]["fallback_text"], "Available locations");
        },
    );
}

#[test]
fn metadata_previews_then_writes_the_library() {
    let sandbox = tempfile::tempdir().expect("tempdir");
    let roster = sandbox.path().join("roster.csv");
    fs::write(
        &roster,
        "Location Name,Series,Height,Width,No. of Faces,Spot Length (in seconds),Loop Length (in seconds),SOV\n\
         The Gateway,Gateway Series,14,58,2,16,96,0.166\n\
         Harbour Gate,Harbour,8,24,4,static,,\n",
    )
    .expect("write roster csv");
    let library = sandbox.path().join("library");

    with_env(&[("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test")], || {
        let dry_run = Cli::try_parse_from([
            "deckhand",
            "metadata",
            "--input",
            roster.to_str().expect("utf-8 roster path"),
            "--out-dir",
            library.to_str().expect("utf-8 library path"),
            "--dry-run",
        ])
        .expect("parse metadata invocation");
        let result = run_command(dry_run);
        assert_eq!(result.exit_code, 0, "metadata dry-run failed: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "metadata");
        assert_eq!(payload["dry_run"], true);
        assert_eq!(payload["count"], 2);
        assert!(!library.exists(), "dry-run must not write anything");

        let write = Cli::try_parse_from([
            "deckhand",
            "metadata",
            "--input",
            roster.to_str().expect("utf-8 roster path"),
            "--out-dir",
            library.to_str().expect("utf-8 library path"),
        ])
        .expect("parse metadata invocation");
        let result = run_command(write);
        assert_eq!(result.exit_code, 0, "metadata write failed: {}", result.output);

        let metadata = fs::read_to_string(library.join("gateway/metadata.txt"))
            .expect("generated metadata exists");
        assert!(metadata.contains("Display Name: The Gateway"));
    });
}

#[test]
fn fonts_without_a_source_dir_fails_config_validation() {
    with_env(&[("DECKHAND_SLACK_BOT_TOKEN", "xoxb-test")], || {
        let cli = Cli::try_parse_from(["deckhand", "fonts"]).expect("parse fonts invocation");
        let result = run_command(cli);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "fonts");
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload["message"].as_str().unwrap_or("").contains("fonts.source_dir"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn decimal_field(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_default()
        .parse::<Decimal>()
        .expect("amount fields serialize as decimal strings")
}

fn deck_template_bytes() -> Vec<u8> {
    let deck = Deck {
        size: SlideSize::from_inches(13.333, 7.5),
        slides: vec![Slide::named("cover"), Slide::named("closing")],
    };
    deck.to_json_vec().expect("serialize deck template")
}

fn write_library(root: &Path) {
    for location in Location::ALL {
        let dir = root.join(location.slug());
        fs::create_dir_all(&dir).expect("create location dir");
        fs::write(dir.join(format!("{}.deck.json", location.slug())), deck_template_bytes())
            .expect("write deck template");
        fs::write(
            dir.join("metadata.txt"),
            format!(
                "Display Name: {}\nSpot Duration: 16\nLoop Duration: 96\n",
                location.display_name()
            ),
        )
        .expect("write metadata");
    }
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    // Recover the guard if another test panicked while holding it; each run
    // resets every key below, so a poisoned lock carries no stale state.
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let keys = [
        "DECKHAND_CONFIG",
        "DECKHAND_DATABASE_URL",
        "DECKHAND_DATABASE_MAX_CONNECTIONS",
        "DECKHAND_DATABASE_TIMEOUT_SECS",
        "DECKHAND_SLACK_BOT_TOKEN",
        "DECKHAND_LIBRARY_ROOT",
        "DECKHAND_LIBRARY_HEADER_IMAGE",
        "DECKHAND_LIBRARY_HEADER_IMAGE_ASPECT",
        "DECKHAND_RENDER_OUTPUT_DIR",
        "DECKHAND_RENDER_CONVERT_TIMEOUT_SECS",
        "DECKHAND_FONTS_SOURCE_DIR",
        "DECKHAND_LOGGING_LEVEL",
        "DECKHAND_LOGGING_FORMAT",
        "DECKHAND_LOG_LEVEL",
        "DECKHAND_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
