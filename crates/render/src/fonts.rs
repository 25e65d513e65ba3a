//! Brand font installation for the rendering toolchain.
//!
//! Rendering looks best with the media owner's typeface installed, but a
//! missing or unwritable font setup must never block a proposal. Every step
//! here is attempted, logged, and moved past.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// What one installation attempt did.
#[derive(Debug, Default)]
pub struct FontReport {
    pub installed: Vec<String>,
    pub already_present: Vec<String>,
    /// The directory fonts landed in, when any target was writable.
    pub target: Option<PathBuf>,
}

impl FontReport {
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.already_present.is_empty()
    }
}

pub struct FontInstaller {
    source_dir: PathBuf,
}

impl FontInstaller {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self { source_dir: source_dir.into() }
    }

    /// Copy fonts into the first writable system font directory, then poke
    /// the font cache. Failures are logged and skipped.
    pub fn install(&self) -> FontReport {
        let report = self.install_into(&default_font_dirs());
        if report.target.is_some() && !report.installed.is_empty() {
            refresh_font_cache();
        }
        report
    }

    /// Like [`install`](Self::install) but with explicit targets, tried in
    /// order until one accepts the copies.
    pub fn install_into(&self, targets: &[PathBuf]) -> FontReport {
        let mut report = FontReport::default();

        if !self.source_dir.is_dir() {
            info!(dir = %self.source_dir.display(), "no font source directory, skipping install");
            return report;
        }

        let fonts = font_files(&self.source_dir);
        if fonts.is_empty() {
            info!(dir = %self.source_dir.display(), "no font files found, skipping install");
            return report;
        }

        for target in targets {
            match copy_fonts(&fonts, target) {
                Ok((installed, already_present)) => {
                    for name in &installed {
                        info!(font = %name, dir = %target.display(), "installed font");
                    }
                    report.installed = installed;
                    report.already_present = already_present;
                    report.target = Some(target.clone());
                    break;
                }
                Err(e) => {
                    debug!(dir = %target.display(), error = %e, "font directory not usable");
                    continue;
                }
            }
        }

        if report.target.is_none() {
            warn!("no writable font directory found, continuing without brand fonts");
        }

        report
    }
}

/// Font files in the source directory, sorted by file name.
fn font_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut fonts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
                .unwrap_or(false)
        })
        .collect();
    fonts.sort();
    fonts
}

fn copy_fonts(fonts: &[PathBuf], target: &Path) -> io::Result<(Vec<String>, Vec<String>)> {
    fs::create_dir_all(target)?;

    let mut installed = Vec::new();
    let mut already_present = Vec::new();
    for font in fonts {
        let Some(name) = font.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let dest = target.join(name);
        if dest.exists() {
            already_present.push(name.to_owned());
        } else {
            fs::copy(font, &dest)?;
            installed.push(name.to_owned());
        }
    }
    Ok((installed, already_present))
}

fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".fonts"));
        dirs.push(home.join(".local/share/fonts"));
    }
    dirs.push(PathBuf::from("/usr/share/fonts/truetype/custom"));
    dirs
}

fn refresh_font_cache() {
    let Ok(fc_cache) = which::which("fc-cache") else {
        debug!("fc-cache not found, renderer will pick fonts up on next cache rebuild");
        return;
    };

    match std::process::Command::new(fc_cache).arg("-f").output() {
        Ok(output) if output.status.success() => info!("font cache refreshed"),
        Ok(output) => {
            warn!(status = %output.status, "fc-cache exited nonzero, continuing");
        }
        Err(e) => {
            warn!(error = %e, "could not run fc-cache, continuing");
        }
    }
}
