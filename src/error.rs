//! Request-level failures of the optimizer.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// Missing or rejected bearer credential.
    Unauthorized,
    /// No delivery stops were supplied.
    EmptyRequest,
    /// Malformed body or stop data.
    InvalidRequest(String),
    /// Every stop failed geocoding.
    NoValidDestinations,
    /// The matrix provider answered with a non-OK overall status.
    RoutingProviderError { status: String },
    /// The matrix provider could not be reached.
    ProviderUnavailable(String),
    /// The request deadline passed before the route was finished.
    Timeout,
}

impl OptimizeError {
    /// HTTP status the boundary should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            OptimizeError::Unauthorized => 401,
            OptimizeError::EmptyRequest | OptimizeError::InvalidRequest(_) => 400,
            OptimizeError::NoValidDestinations => 422,
            OptimizeError::RoutingProviderError { .. } | OptimizeError::ProviderUnavailable(_) => {
                502
            }
            OptimizeError::Timeout => 504,
        }
    }

    /// Text safe to show to end users. Never includes provider output.
    pub fn public_message(&self) -> &'static str {
        match self {
            OptimizeError::Unauthorized => "authentication required",
            OptimizeError::EmptyRequest => "no deliveries to optimize",
            OptimizeError::InvalidRequest(_) => "invalid optimization request",
            OptimizeError::NoValidDestinations => "no deliveries could be located",
            OptimizeError::RoutingProviderError { .. }
            | OptimizeError::ProviderUnavailable(_)
            | OptimizeError::Timeout => "route unavailable",
        }
    }
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::Unauthorized => write!(f, "unauthorized"),
            OptimizeError::EmptyRequest => write!(f, "request contains no deliveries"),
            OptimizeError::InvalidRequest(reason) => write!(f, "invalid request: {}", reason),
            OptimizeError::NoValidDestinations => write!(f, "no deliveries have valid coordinates"),
            OptimizeError::RoutingProviderError { status } => {
                write!(f, "routing provider returned status {}", status)
            }
            OptimizeError::ProviderUnavailable(reason) => {
                write!(f, "routing provider unavailable: {}", reason)
            }
            OptimizeError::Timeout => write!(f, "request deadline exceeded"),
        }
    }
}

impl std::error::Error for OptimizeError {}

impl From<serde_json::Error> for OptimizeError {
    fn from(err: serde_json::Error) -> Self {
        OptimizeError::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(OptimizeError::Unauthorized.status_code(), 401);
        assert_eq!(OptimizeError::EmptyRequest.status_code(), 400);
        assert_eq!(OptimizeError::NoValidDestinations.status_code(), 422);
        assert_eq!(
            OptimizeError::RoutingProviderError {
                status: "OVER_QUERY_LIMIT".to_string()
            }
            .status_code(),
            502
        );
        assert_eq!(OptimizeError::Timeout.status_code(), 504);
    }

    #[test]
    fn test_public_message_hides_provider_text() {
        let err = OptimizeError::RoutingProviderError {
            status: "REQUEST_DENIED: key invalid".to_string(),
        };
        assert_eq!(err.public_message(), "route unavailable");
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }
}
