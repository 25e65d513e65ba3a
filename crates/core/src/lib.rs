pub mod builder;
pub mod config;
pub mod dates;
pub mod deck;
pub mod domain;
pub mod errors;
pub mod layout;
pub mod library;
pub mod money;

pub use builder::{BuiltProposal, HeaderImage, ProposalSlideBuilder};
pub use deck::{Deck, Emu, Rect, Shape, ShapeKind, Slide, SlideSize};
pub use domain::history::{NewProposalRecord, ProposalRecord};
pub use domain::location::Location;
pub use domain::proposal::{PricedOption, PricingOption, ProposalRequest};
pub use errors::{AppError, BuildError, InterfaceError, PresentationError, ValidationError};
pub use layout::{option_columns, SlidePlan};
pub use library::{DisplayKind, LocationProfile, LocationRegistry, LocationSource, RegistryError};
