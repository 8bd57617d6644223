//! Error types for the Chaster client.
//!
//! Every public operation returns [`ChasterResult`]. The taxonomy is closed:
//! argument validation, transport failures, unexpected status codes and
//! body decoding, plus configuration errors raised while building a client.

use thiserror::Error;

use crate::response::ResponseEnvelope;
use crate::transport::TransportError;

/// Result type alias for Chaster operations.
pub type ChasterResult<T> = Result<T, ChasterError>;

/// Error type for Chaster client operations.
#[derive(Debug, Error)]
pub enum ChasterError {
    /// A required argument was empty or absent. Raised before any network I/O.
    #[error("{message}")]
    InvalidArgument {
        /// Name of the offending argument.
        field: String,
        /// Human readable message.
        message: String,
    },

    /// The HTTP exchange could not complete.
    #[error("Request failed: {message}")]
    Transport {
        /// Message of the underlying cause.
        message: String,
        /// Status-like code reported by the cause, if any.
        code: Option<u16>,
    },

    /// The exchange completed with a status other than the expected one.
    #[error("HTTP Code Expected: {expected} Actual: {actual} Reason: {reason_phrase}")]
    UnexpectedStatus {
        /// Status code the endpoint is documented to return.
        expected: u16,
        /// Status code actually returned.
        actual: u16,
        /// Reason phrase of the actual response.
        reason_phrase: String,
        /// The response, kept for diagnostics.
        envelope: Box<ResponseEnvelope>,
    },

    /// The response body could not be decoded as JSON.
    #[error("Json decode failed: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },

    /// Invalid client configuration (token, base URL, HTTP client setup).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },
}

impl ChasterError {
    /// Creates an invalid argument error with an explicit message.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChasterError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates the error raised when a mandatory argument is empty.
    pub fn mandatory(field: impl Into<String>) -> Self {
        let field = field.into();
        ChasterError::InvalidArgument {
            message: format!("{} is mandatory, can't be empty", field),
            field,
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        ChasterError::Decode {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ChasterError::Configuration {
            message: message.into(),
        }
    }

    /// Returns the HTTP status of the response that caused this error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ChasterError::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// Returns the code carried by a transport error.
    pub fn transport_code(&self) -> Option<u16> {
        match self {
            ChasterError::Transport { code, .. } => *code,
            _ => None,
        }
    }

    /// Returns the response attached to an unexpected status error.
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            ChasterError::UnexpectedStatus { envelope, .. } => Some(envelope.as_ref()),
            _ => None,
        }
    }

    /// Returns true if the error was raised by argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ChasterError::InvalidArgument { .. })
    }

    /// Returns true if the HTTP exchange itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChasterError::Transport { .. })
    }
}

impl From<TransportError> for ChasterError {
    fn from(err: TransportError) -> Self {
        ChasterError::Transport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Used for response bodies only. Request encoding failures are argument errors.
impl From<serde_json::Error> for ChasterError {
    fn from(err: serde_json::Error) -> Self {
        ChasterError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for ChasterError {
    fn from(err: url::ParseError) -> Self {
        ChasterError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_message() {
        let error = ChasterError::mandatory("Lock ID");

        assert!(error.is_invalid_argument());
        assert_eq!(error.to_string(), "Lock ID is mandatory, can't be empty");
        if let ChasterError::InvalidArgument { field, .. } = error {
            assert_eq!(field, "Lock ID");
        } else {
            panic!("Expected InvalidArgument error");
        }
    }

    #[test]
    fn test_transport_error_conversion_keeps_message_and_code() {
        let error: ChasterError = TransportError::Connection {
            message: "Unauthorized mock".to_string(),
            code: Some(401),
        }
        .into();

        assert!(error.is_transport());
        assert_eq!(error.transport_code(), Some(401));
        assert!(error.to_string().contains("Unauthorized mock"));
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_unexpected_status_message() {
        let envelope = ResponseEnvelope::from_parts(200, Default::default(), "{}");
        let error = ChasterError::UnexpectedStatus {
            expected: 201,
            actual: 200,
            reason_phrase: "OK".to_string(),
            envelope: Box::new(envelope),
        };

        assert_eq!(error.to_string(), "HTTP Code Expected: 201 Actual: 200 Reason: OK");
        assert_eq!(error.status_code(), Some(200));
        assert!(error.envelope().is_some());
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: ChasterError = err.into();
        assert!(matches!(error, ChasterError::Decode { .. }));
    }
}
