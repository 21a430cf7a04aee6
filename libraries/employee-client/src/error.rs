//! Error types for the employee client.

use thiserror::Error;

/// Errors that can occur when talking to the employee backend.
///
/// Every remote failure carries the HTTP status and the response body of the
/// last request that was attempted. A status of `0` means no response was
/// received or the body could not be interpreted.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A client-side precondition was not met. Nothing was sent.
    #[error("{0}")]
    ValidationFailed(String),

    /// No identifier could be extracted from the record.
    #[error("Missing user id")]
    MissingIdentifier,

    /// Listing all records failed
    #[error("Request failed ({status}): {}", or_no_body(.body))]
    ListFailed { status: u16, body: String },

    /// The create endpoint rejected the record
    #[error("Create failed ({status}): {}", or_no_body(.body))]
    CreateFailed { status: u16, body: String },

    /// Every update candidate failed
    #[error("Update failed ({status}): {}", or_no_body(.body))]
    UpdateFailed { status: u16, body: String },

    /// Every delete candidate failed
    #[error("Delete failed ({status}): {}", or_no_body(.body))]
    DeleteFailed { status: u16, body: String },

    /// Find-by-email returned an unexpected status
    #[error("Search failed ({status}): {}", or_no_body(.body))]
    SearchFailed { status: u16, body: String },

    /// Profile lookup failed, including when no record matched
    #[error("Failed ({status}): {}", or_no_body(.body))]
    ProfileFailed { status: u16, body: String },

    /// Registration was rejected by the server
    #[error("{message}")]
    RegisterFailed { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Status code of the last response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ListFailed { status, .. }
            | Self::CreateFailed { status, .. }
            | Self::UpdateFailed { status, .. }
            | Self::DeleteFailed { status, .. }
            | Self::SearchFailed { status, .. }
            | Self::ProfileFailed { status, .. }
            | Self::RegisterFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map a transport error, separating unreachable servers from other failures.
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

fn or_no_body(body: &str) -> &str {
    if body.is_empty() {
        "no body"
    } else {
        body
    }
}

/// Result type for employee client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_fall_back_to_no_body() {
        let err = ClientError::UpdateFailed {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Update failed (404): no body");

        let err = ClientError::DeleteFailed {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "Delete failed (500): boom");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(
            ClientError::SearchFailed {
                status: 503,
                body: String::new()
            }
            .status(),
            Some(503)
        );
        assert_eq!(ClientError::MissingIdentifier.status(), None);
    }
}
