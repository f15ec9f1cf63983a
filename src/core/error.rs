/// Marquee Error Module
///
/// This module defines the error types for the marquee application.
/// The taxonomy is deliberately small: a connection failure is fatal at
/// startup, while statement and validation failures are reported to the
/// user and the menu loop continues.
use thiserror::Error;

/// Error type covering every failure the client can surface.
#[derive(Error, Debug)]
pub enum MarqueeError {
    /// Failure to open the database connection. Fatal at startup.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement the server rejected or could not run.
    #[error("Statement error: {0}")]
    Statement(String),

    /// User input that does not meet a handler's preconditions
    /// (non-numeric id, malformed date, unknown booking id, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal and prompt I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use MarqueeError as the error type.
///
/// This provides a consistent error type across the entire application
/// instead of using `Result<T, String>` or mixed error types.
pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let conn_err = MarqueeError::Connection("connection refused".to_string());
        assert!(conn_err.to_string().contains("Connection error"));

        let stmt_err = MarqueeError::Statement("duplicate key".to_string());
        assert!(stmt_err.to_string().contains("Statement error"));

        let validation_err = MarqueeError::Validation("not a number".to_string());
        assert!(validation_err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "end of input");
        let err: MarqueeError = io_err.into();
        match err {
            MarqueeError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }
}
