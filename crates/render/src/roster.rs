//! Location library scaffolding from a roster spreadsheet export.
//!
//! Sales keeps the display inventory in a spreadsheet; this turns its CSV
//! export into one directory per location with a `metadata.txt` the profile
//! parser reads back. Decks are dropped in next to them by hand.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use deckhand_core::library::profile::{DEFAULT_LOOP_SECONDS, DEFAULT_SPOT_SECONDS};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("could not read roster: {0}")]
    Read(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One roster row as exported. Column names mirror the spreadsheet;
/// everything is optional because sales leaves plenty of cells blank.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Location Name", default)]
    location_name: Option<String>,
    #[serde(rename = "Series", default)]
    series: Option<String>,
    #[serde(rename = "Height", default)]
    height: Option<String>,
    #[serde(rename = "Width", default)]
    width: Option<String>,
    #[serde(rename = "No. of Faces", default)]
    faces: Option<String>,
    #[serde(rename = "Spot Length (in seconds)", default)]
    spot_length: Option<String>,
    #[serde(rename = "Loop Length (in seconds)", default)]
    loop_length: Option<String>,
    #[serde(rename = "SOV", default)]
    sov: Option<String>,
}

impl RosterRow {
    fn is_static(&self) -> bool {
        self.spot_length.as_deref().is_some_and(|spot| spot.eq_ignore_ascii_case("static"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLocation {
    pub folder: String,
    pub display_name: String,
    pub metadata: String,
}

pub struct MetadataGenerator {
    output_dir: PathBuf,
}

impl MetadataGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    /// Parse the roster and build metadata without touching the filesystem.
    /// Rows without a usable location name are skipped.
    pub fn preview(&self, roster_csv: &Path) -> Result<Vec<GeneratedLocation>, RosterError> {
        let mut reader =
            csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(roster_csv)?;

        let mut generated = Vec::new();
        for row in reader.deserialize::<RosterRow>() {
            let row = row?;
            let Some(display_name) = row.location_name.clone().filter(|n| !n.is_empty()) else {
                continue;
            };
            let folder = clean_folder_name(&display_name);
            if folder.is_empty() {
                continue;
            }
            generated.push(GeneratedLocation {
                folder,
                metadata: metadata_for(&display_name, &row),
                display_name,
            });
        }
        Ok(generated)
    }

    /// Write one directory with `metadata.txt` per roster row.
    pub fn generate(&self, roster_csv: &Path) -> Result<Vec<GeneratedLocation>, RosterError> {
        let locations = self.preview(roster_csv)?;
        for location in &locations {
            let dir = self.output_dir.join(&location.folder);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("metadata.txt"), &location.metadata)?;
            info!(folder = %location.folder, "wrote location metadata");
        }
        Ok(locations)
    }
}

/// Location name to directory name: drop a leading "The", strip punctuation,
/// squash separators to underscores.
fn clean_folder_name(name: &str) -> String {
    let name = name.trim();
    let name = if name.len() >= 4 && name[..4].eq_ignore_ascii_case("the ") {
        &name[4..]
    } else {
        name
    };

    let mut folder = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !folder.is_empty() {
                folder.push('_');
            }
            pending_separator = false;
            folder.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }
    folder
}

fn metadata_for(display_name: &str, row: &RosterRow) -> String {
    let mut lines = vec![
        format!("Location Name: {display_name}"),
        format!("Display Name: {display_name}"),
    ];

    if row.is_static() {
        lines.push("Display Type: Static".to_string());
        if let Some(faces) = parse_count(row.faces.as_deref()) {
            lines.push(format!("Number of Faces: {faces}"));
        }
    } else {
        let spot = parse_count(row.spot_length.as_deref())
            .unwrap_or(u64::from(DEFAULT_SPOT_SECONDS));
        let loop_seconds = parse_count(row.loop_length.as_deref())
            .unwrap_or(u64::from(DEFAULT_LOOP_SECONDS));
        lines.push("Display Type: Digital".to_string());
        lines.push(format!("Spot Duration: {spot}"));
        lines.push(format!("Loop Duration: {loop_seconds}"));
        lines.push(format!("SOV: {}", format_sov(row.sov.as_deref(), spot, loop_seconds)));
        lines.push("Upload Fee: 3000".to_string());
    }

    if let Some(series) = row.series.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Series: {series}"));
    }
    if let Some(height) = row.height.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Height: {height}m"));
    }
    if let Some(width) = row.width.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Width: {width}m"));
    }

    lines.join("\n")
}

/// Share of voice: the spreadsheet stores it as a fraction; without one it
/// falls out of the spot and loop lengths.
fn format_sov(sov: Option<&str>, spot: u64, loop_seconds: u64) -> String {
    if let Some(value) = sov.and_then(|s| s.parse::<f64>().ok()) {
        return format!("{:.1}%", value * 100.0);
    }
    if loop_seconds > 0 {
        return format!("{:.1}%", spot as f64 / loop_seconds as f64 * 100.0);
    }
    "16.6%".to_string()
}

fn parse_count(value: Option<&str>) -> Option<u64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u64)
}
