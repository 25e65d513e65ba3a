pub mod history;
pub mod location;
pub mod proposal;

pub use history::{NewProposalRecord, ProposalRecord};
pub use location::Location;
pub use proposal::{PricedOption, PricingOption, ProposalRequest};
