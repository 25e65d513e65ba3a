//! Output side of the proposal pipeline: turning a built deck into
//! something a client can open, plus the supporting asset chores.
//!
//! # Key Types
//!
//! - `DeckRenderer` - Renders a deck manifest to print-ready HTML
//! - `PdfConverter` - Drives `wkhtmltopdf` with an HTML fallback
//! - `FontInstaller` - Copies brand fonts into a user font directory
//! - `MetadataGenerator` - Builds location library folders from a roster CSV

pub mod fonts;
pub mod html;
pub mod pdf;
pub mod roster;

pub use fonts::{FontInstaller, FontReport};
pub use html::{DeckRenderer, RenderError};
pub use pdf::{is_wkhtmltopdf_available, PdfConverter, PdfError, RenderedDoc};
pub use roster::{GeneratedLocation, MetadataGenerator, RosterError};
