use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::location::Location;
use super::proposal::PricedOption;

/// The only package type produced today. The column stays free-form so other
/// packagings can land without a schema change.
pub const PACKAGE_SINGLE: &str = "single";

/// Everything the proposal log keeps about one build, before it has a row id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProposalRecord {
    pub submitted_by: Option<String>,
    pub client_name: String,
    pub location: Location,
    pub package_type: String,
    pub options: Vec<PricedOption>,
    /// Headline figure for the log: the first option's total.
    pub total_amount: Decimal,
    pub correlation_id: Option<String>,
}

/// A persisted proposal log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: i64,
    pub submitted_by: Option<String>,
    pub client_name: String,
    pub generated_at: DateTime<Utc>,
    pub location: Location,
    pub package_type: String,
    pub options: Vec<PricedOption>,
    pub total_amount: Decimal,
    pub correlation_id: Option<String>,
}
