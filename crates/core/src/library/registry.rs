use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Location;

use super::profile::LocationProfile;

/// Why the registry refused to open. All of these surface at startup; a
/// request never discovers a broken library.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("library root {root} is not a directory")]
    MissingRoot { root: PathBuf },
    #[error("location {location} has no library directory at {path}")]
    MissingLocationDir { location: Location, path: PathBuf },
    #[error("location {location} has no deck template at {path}")]
    MissingDeck { location: Location, path: PathBuf },
    #[error("location {location} metadata at {path} could not be read: {source}")]
    UnreadableMetadata {
        location: Location,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the pipeline needs to serve one location.
#[derive(Clone, Debug)]
pub struct LocationSource {
    pub deck_path: PathBuf,
    pub profile: LocationProfile,
}

/// The location library, walked once at startup.
///
/// Every [`Location`] variant must have a directory named after its slug
/// containing `<slug>.deck.json` and `metadata.txt`; any gap fails `open`.
/// After that, resolution is a map lookup and requests only ever fail on
/// their own validation.
#[derive(Clone, Debug)]
pub struct LocationRegistry {
    root: PathBuf,
    sources: HashMap<Location, LocationSource>,
}

impl LocationRegistry {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RegistryError::MissingRoot { root });
        }

        let mut sources = HashMap::with_capacity(Location::ALL.len());
        for location in Location::ALL {
            sources.insert(location, Self::load_source(&root, location)?);
        }
        Ok(LocationRegistry { root, sources })
    }

    fn load_source(root: &Path, location: Location) -> Result<LocationSource, RegistryError> {
        let dir = root.join(location.slug());
        if !dir.is_dir() {
            return Err(RegistryError::MissingLocationDir { location, path: dir });
        }

        let deck_path = dir.join(format!("{}.deck.json", location.slug()));
        if !deck_path.is_file() {
            return Err(RegistryError::MissingDeck { location, path: deck_path });
        }

        let metadata_path = dir.join("metadata.txt");
        let text = fs::read_to_string(&metadata_path).map_err(|source| {
            RegistryError::UnreadableMetadata { location, path: metadata_path, source }
        })?;

        let mut profile = LocationProfile::parse(&text);
        if profile.display_name.is_empty() {
            profile.display_name = location.display_name().to_owned();
        }
        Ok(LocationSource { deck_path, profile })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, location: Location) -> Option<&LocationSource> {
        self.sources.get(&location)
    }

    /// Sources in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &LocationSource)> {
        Location::ALL.iter().filter_map(|location| {
            self.sources.get(location).map(|source| (*location, source))
        })
    }

    /// Display names in canonical order, for roster listings.
    pub fn roster(&self) -> Vec<String> {
        self.iter().map(|(_, source)| source.profile.display_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use crate::domain::Location;

    use super::{LocationRegistry, RegistryError};

    fn write_library(root: &Path) {
        for location in Location::ALL {
            let dir = root.join(location.slug());
            fs::create_dir_all(&dir).expect("create location dir");
            fs::write(
                dir.join(format!("{}.deck.json", location.slug())),
                b"{}", // registry checks presence, not content
            )
            .expect("write deck");
            fs::write(
                dir.join("metadata.txt"),
                format!("Display Name: {}\nNumber of Faces: 2\n", location.display_name()),
            )
            .expect("write metadata");
        }
    }

    #[test]
    fn opens_a_complete_library() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_library(dir.path());

        let registry = LocationRegistry::open(dir.path()).expect("registry opens");

        let gateway = registry.resolve(Location::Gateway).expect("gateway registered");
        assert_eq!(gateway.profile.display_name, "The Gateway");
        assert!(gateway.deck_path.ends_with("gateway/gateway.deck.json"));
        assert_eq!(registry.roster().len(), Location::ALL.len());
    }

    #[test]
    fn missing_root_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = LocationRegistry::open(dir.path().join("nowhere"));

        assert!(matches!(result, Err(RegistryError::MissingRoot { .. })));
    }

    #[test]
    fn missing_location_directory_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_library(dir.path());
        fs::remove_dir_all(dir.path().join("oryx")).expect("remove oryx");

        let result = LocationRegistry::open(dir.path());

        assert!(matches!(
            result,
            Err(RegistryError::MissingLocationDir { location: Location::Oryx, .. })
        ));
    }

    #[test]
    fn missing_deck_template_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_library(dir.path());
        fs::remove_file(dir.path().join("landmark/landmark.deck.json")).expect("remove deck");

        let result = LocationRegistry::open(dir.path());

        assert!(matches!(
            result,
            Err(RegistryError::MissingDeck { location: Location::Landmark, .. })
        ));
    }

    #[test]
    fn missing_metadata_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_library(dir.path());
        fs::remove_file(dir.path().join("jawhara/metadata.txt")).expect("remove metadata");

        let result = LocationRegistry::open(dir.path());

        assert!(matches!(
            result,
            Err(RegistryError::UnreadableMetadata { location: Location::Jawhara, .. })
        ));
    }

    #[test]
    fn empty_display_name_falls_back_to_the_canonical_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_library(dir.path());
        fs::write(dir.path().join("oryx/metadata.txt"), "Series: Premium\n")
            .expect("rewrite metadata");

        let registry = LocationRegistry::open(dir.path()).expect("registry opens");

        assert_eq!(
            registry.resolve(Location::Oryx).expect("oryx registered").profile.display_name,
            "The Oryx"
        );
    }
}
