/// CLI error types
use employee_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("No employee with id {0}")]
    UnknownEmployee(String),

    /// An operation failed and the dashboard recorded the message.
    #[error("{0}")]
    Operation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
