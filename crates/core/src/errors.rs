use rust_decimal::Decimal;
use thiserror::Error;

/// Request-level failures. A request that fails validation never touches the
/// presentation deck.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no pricing options were provided")]
    EmptyOptions,
    #[error("option {index}: duration must be at least one week")]
    NonPositiveDuration { index: usize },
    #[error("option {index}: net rate must be positive (got {rate})")]
    NonPositiveRate { index: usize, rate: Decimal },
    #[error("mismatched option lists: {durations} durations but {rates} rates")]
    MismatchedOptions { durations: usize, rates: usize },
    #[error("unknown location: {name:?}")]
    UnknownLocation { name: String },
}

/// Deck-level failures raised while reading the base presentation. Distinct
/// from [`ValidationError`]: the request was fine, the deck was not.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("presentation input is empty")]
    EmptyInput,
    #[error("presentation could not be parsed: {reason}")]
    Malformed { reason: String },
    #[error("presentation contains no slides")]
    NoSlides,
    #[error("presentation page size is invalid: {width}x{height} EMU")]
    InvalidDimensions { width: i64, height: i64 },
}

/// Everything the slide builder itself can fail with.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

/// Failures of orchestration code around the builder.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("library registry failure: {0}")]
    Registry(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("render failure: {0}")]
    Render(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Build(BuildError::Validation(value))
    }
}

impl From<PresentationError> for AppError {
    fn from(value: PresentationError) -> Self {
        Self::Build(BuildError::Presentation(value))
    }
}

/// The shape errors take at the outermost caller. Every instance carries the
/// correlation id of the request that produced it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    /// Text safe to show a requester. Request problems name their specific
    /// cause; everything else stays generic.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message, .. } => message.clone(),
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly.".to_owned()
            }
            Self::Internal { .. } => "An unexpected internal error occurred.".to_owned(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl AppError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<AppError> for InterfaceError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Build(build) => Self::BadRequest {
                message: build.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            AppError::Registry(message)
            | AppError::Persistence(message)
            | AppError::Render(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            AppError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}
