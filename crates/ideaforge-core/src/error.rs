use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: domain, audience, difficulty, time_available_days, mode";

/// Why an incoming generation request was rejected.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    /// Body is not JSON, or a field has the wrong type.
    #[error("{0}")]
    Malformed(String),
}

/// Why a model reply could not be coerced into JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// Nothing brace-delimited in the reply at all.
    #[error("AI did not return valid JSON. Please try again.")]
    NoJson,

    /// A candidate was found but it is not valid JSON (or not the expected shape).
    #[error("Failed to parse AI response. Please try again.")]
    Unparseable(String),
}

impl RecoveryError {
    /// Underlying parser detail, for logs only.
    pub fn detail(&self) -> &str {
        match self {
            RecoveryError::NoJson => "no brace-delimited block",
            RecoveryError::Unparseable(detail) => detail,
        }
    }
}
