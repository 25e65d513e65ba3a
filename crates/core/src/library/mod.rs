//! The on-disk location library: one directory per site holding its base
//! deck template and a `metadata.txt` profile.

pub mod profile;
pub mod registry;

pub use profile::{DisplayKind, LocationProfile};
pub use registry::{LocationRegistry, LocationSource, RegistryError};
