use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPOT_SECONDS: u32 = 16;
pub const DEFAULT_LOOP_SECONDS: u32 = 96;
pub const DEFAULT_SOV_PERCENT: f64 = 16.6;

/// Artwork upload fee applied when a profile does not carry its own.
pub fn default_upload_fee() -> Decimal {
    Decimal::from(3_000)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    #[default]
    Digital,
    Static,
}

/// Per-site facts stored beside each deck template as `metadata.txt`.
///
/// Parsing is lenient the way the library files are messy: unknown keys are
/// ignored and unparseable values fall back to the documented defaults. Only
/// a missing file is an error, and that is the registry's call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationProfile {
    pub display_name: String,
    pub series: String,
    /// Freeform: `"7.5m"`, `"12"`, or `"Multiple Sizes"`.
    pub height: String,
    pub width: String,
    pub faces: u32,
    pub display_kind: DisplayKind,
    pub spot_seconds: u32,
    pub loop_seconds: u32,
    pub sov_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_fee: Option<Decimal>,
}

impl Default for LocationProfile {
    fn default() -> Self {
        LocationProfile {
            display_name: String::new(),
            series: String::new(),
            height: String::new(),
            width: String::new(),
            faces: 1,
            display_kind: DisplayKind::Digital,
            spot_seconds: DEFAULT_SPOT_SECONDS,
            loop_seconds: DEFAULT_LOOP_SECONDS,
            sov_percent: DEFAULT_SOV_PERCENT,
            upload_fee: None,
        }
    }
}

impl LocationProfile {
    /// Parse `key: value` lines. Keys are matched case-insensitively with
    /// spaces treated as underscores; `display name` and `location name` are
    /// the same field with the former winning when both appear.
    pub fn parse(text: &str) -> LocationProfile {
        let mut profile = LocationProfile::default();
        let mut display_name = None;
        let mut location_name = None;

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else { continue };
            let key = key.trim().to_ascii_lowercase().replace(' ', "_");
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "display_name" => display_name = Some(value.to_owned()),
                "location_name" => location_name = Some(value.to_owned()),
                "series" => profile.series = value.to_owned(),
                "height" => profile.height = value.to_owned(),
                "width" => profile.width = value.to_owned(),
                "number_of_faces" => {
                    profile.faces = value.parse().unwrap_or(1);
                }
                "display_type" => {
                    profile.display_kind = if value.eq_ignore_ascii_case("static") {
                        DisplayKind::Static
                    } else {
                        DisplayKind::Digital
                    };
                }
                "spot_duration" => {
                    profile.spot_seconds = value.parse().unwrap_or(DEFAULT_SPOT_SECONDS);
                }
                "loop_duration" => {
                    profile.loop_seconds = value.parse().unwrap_or(DEFAULT_LOOP_SECONDS);
                }
                "sov" => {
                    profile.sov_percent = value
                        .trim_end_matches('%')
                        .trim()
                        .parse()
                        .unwrap_or(DEFAULT_SOV_PERCENT);
                }
                "upload_fee" => {
                    profile.upload_fee = value.replace(',', "").parse::<Decimal>().ok();
                }
                _ => {}
            }
        }

        profile.display_name = display_name.or(location_name).unwrap_or_default();
        profile
    }

    pub fn upload_fee_or_default(&self) -> Decimal {
        self.upload_fee.unwrap_or_else(default_upload_fee)
    }

    /// The one-line placement summary shown on slides and in messages:
    /// series, site, size, faces, then spot details for digital displays.
    pub fn placement_line(&self, spots: u32) -> String {
        let mut parts = Vec::new();

        if self.series.is_empty() {
            parts.push(self.display_name.clone());
        } else {
            parts.push(format!("{}: {}", self.series, self.display_name));
        }

        if !self.height.is_empty() && !self.width.is_empty() {
            let multiple = |s: &str| s.to_ascii_lowercase().contains("multiple sizes");
            if multiple(&self.height) || multiple(&self.width) {
                parts.push("Multiple Sizes".to_owned());
            } else {
                let h = self.height.replace('m', "").trim().to_owned();
                let w = self.width.replace('m', "").trim().to_owned();
                parts.push(format!("Size ({h}m x {w}m)"));
            }
        }

        parts.push(format!("{} faces", self.faces));
        parts.push(format!("{spots} {}", if spots == 1 { "spot" } else { "spots" }));

        if self.display_kind == DisplayKind::Digital {
            parts.push(format!("{} Seconds", self.spot_seconds * spots));
            parts.push(format!("{:.1}% SOV", self.sov_percent * f64::from(spots)));
            parts.push(format!("{} seconds loop", self.loop_seconds));
        }

        parts.join(" - ")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{DisplayKind, LocationProfile};

    const GATEWAY_METADATA: &str = "\
Location Name: gateway
Display Name: The Gateway
Series: The Dubai Gateway
Height: 7.5m
Width: 14m
Number of Faces: 2
Display Type: Digital
Spot Duration: 16
Loop Duration: 96
SOV: 16.6%
Upload Fee: 3,000
";

    #[test]
    fn parses_a_full_metadata_file() {
        let profile = LocationProfile::parse(GATEWAY_METADATA);

        assert_eq!(profile.display_name, "The Gateway");
        assert_eq!(profile.series, "The Dubai Gateway");
        assert_eq!(profile.faces, 2);
        assert_eq!(profile.display_kind, DisplayKind::Digital);
        assert_eq!(profile.spot_seconds, 16);
        assert_eq!(profile.loop_seconds, 96);
        assert!((profile.sov_percent - 16.6).abs() < 1e-9);
        assert_eq!(profile.upload_fee, Some(Decimal::from(3_000)));
    }

    #[test]
    fn missing_or_garbled_values_fall_back_to_defaults() {
        let profile = LocationProfile::parse(
            "Display Name: Somewhere\nNumber of Faces: many\nSOV: n/a\njunk line without colon\n",
        );

        assert_eq!(profile.display_name, "Somewhere");
        assert_eq!(profile.faces, 1);
        assert!((profile.sov_percent - 16.6).abs() < 1e-9);
        assert_eq!(profile.spot_seconds, 16);
        assert_eq!(profile.upload_fee, None);
        assert_eq!(profile.upload_fee_or_default(), Decimal::from(3_000));
    }

    #[test]
    fn display_name_wins_over_location_name() {
        let profile = LocationProfile::parse("Display Name: Pretty\nLocation Name: raw_key\n");
        assert_eq!(profile.display_name, "Pretty");

        let fallback = LocationProfile::parse("Location Name: raw_key\n");
        assert_eq!(fallback.display_name, "raw_key");
    }

    #[test]
    fn digital_placement_line_carries_spot_details() {
        let profile = LocationProfile::parse(GATEWAY_METADATA);

        assert_eq!(
            profile.placement_line(1),
            "The Dubai Gateway: The Gateway - Size (7.5m x 14m) - 2 faces - 1 spot - \
             16 Seconds - 16.6% SOV - 96 seconds loop"
        );
        assert_eq!(
            profile.placement_line(2),
            "The Dubai Gateway: The Gateway - Size (7.5m x 14m) - 2 faces - 2 spots - \
             32 Seconds - 33.2% SOV - 96 seconds loop"
        );
    }

    #[test]
    fn static_placement_line_stops_at_spots() {
        let mut profile = LocationProfile::parse(GATEWAY_METADATA);
        profile.display_kind = DisplayKind::Static;

        assert_eq!(
            profile.placement_line(1),
            "The Dubai Gateway: The Gateway - Size (7.5m x 14m) - 2 faces - 1 spot"
        );
    }

    #[test]
    fn multiple_sizes_collapses_the_size_part() {
        let profile =
            LocationProfile::parse("Display Name: Oryx\nHeight: Multiple Sizes\nWidth: 14m\n");

        assert!(profile.placement_line(1).contains("Multiple Sizes"));
        assert!(!profile.placement_line(1).contains("Size ("));
    }
}
