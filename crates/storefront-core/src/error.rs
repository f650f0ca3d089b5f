use thiserror::Error;

/// Client-side validation failures. Raised before any network round
/// trip, or when a response body does not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("unexpected {resource} payload: {detail}")]
    Schema {
        resource: &'static str,
        detail: String,
    },
}

/// Failure taxonomy for remote operations. `Auth` is reported as-is;
/// redirecting to login is a concern of the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("session missing or expired")]
    Auth,
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatewayError {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Auth => "auth",
            Self::NotFound(_) => "not-found",
            Self::Validation(_) => "validation",
        }
    }
}
