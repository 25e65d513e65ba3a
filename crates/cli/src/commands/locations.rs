use serde::Serialize;

use deckhand_core::config::{AppConfig, LoadOptions};
use deckhand_core::{DisplayKind, LocationRegistry};
use deckhand_slack::{location_roster_message, MessageTemplate};

use crate::commands::CommandResult;

/// Lists every location the library can serve, with the placement line a
/// proposal for it would carry. Purely filesystem-backed, so no runtime.
pub fn run(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "locations",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let registry = match LocationRegistry::open(config.library.root.as_str()) {
        Ok(registry) => registry,
        Err(error) => {
            return CommandResult::failure("locations", "library", error.to_string(), 4);
        }
    };

    #[derive(Serialize)]
    struct LocationRow {
        slug: &'static str,
        display_name: String,
        display_kind: DisplayKind,
        placement: String,
    }

    #[derive(Serialize)]
    struct LocationsOutput {
        command: &'static str,
        count: usize,
        locations: Vec<LocationRow>,
        slack: MessageTemplate,
    }

    let locations: Vec<LocationRow> = registry
        .iter()
        .map(|(location, source)| LocationRow {
            slug: location.slug(),
            display_name: source.profile.display_name.clone(),
            display_kind: source.profile.display_kind,
            placement: source.profile.placement_line(1),
        })
        .collect();

    let payload = LocationsOutput {
        command: "locations",
        count: locations.len(),
        locations,
        slack: location_roster_message(&registry.roster()),
    };

    let output = serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"locations\",\"status\":\"error\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: 0, output }
}
