//! Error handling for framekit
//!
//! The interpreter and accumulator never fail on malformed geometry, so the
//! only errors that reach a caller come from the collaborator boundary:
//! - Program source errors (nothing loaded, unreadable)
//! - Machine state errors (no position, unusable feed setting)
//! - Execution errors (the sink rejected the outline)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Frame job error type
///
/// Raised by the collaborators a frame job talks to. Everything that happens
/// inside the interpreter itself is recovered locally and never shows up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// No motion program is loaded, or it cannot be located
    #[error("Program not found: {location}")]
    ProgramNotFound {
        /// Where the program was expected (path, widget name, ...).
        location: String,
    },

    /// The machine position could not be obtained
    #[error("Machine position unavailable: {reason}")]
    PositionUnavailable {
        /// The reason the position is unavailable.
        reason: String,
    },

    /// The feed setting is present but is not a number
    #[error("Invalid feed rate '{value}'")]
    InvalidFeedRate {
        /// The text that failed to parse.
        value: String,
    },

    /// The execution sink rejected the outline
    #[error("Execution failed: {reason}")]
    Execution {
        /// The reason reported by the sink.
        reason: String,
    },
}

/// Main error type for framekit
///
/// A unified error type used by the public APIs of the workspace crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Frame job error
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error means no program was available
    pub fn is_program_not_found(&self) -> bool {
        matches!(self, Error::Frame(FrameError::ProgramNotFound { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_display() {
        let err = FrameError::ProgramNotFound {
            location: "part.nc".to_string(),
        };
        assert_eq!(err.to_string(), "Program not found: part.nc");

        let err = FrameError::InvalidFeedRate {
            value: "fast".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid feed rate 'fast'");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = FrameError::PositionUnavailable {
            reason: "not homed".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            Error::Frame(FrameError::PositionUnavailable { .. })
        ));
        assert!(!err.is_program_not_found());
        assert_eq!(err.to_string(), "Machine position unavailable: not homed");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_program_not_found_predicate() {
        let err: Error = FrameError::ProgramNotFound {
            location: String::new(),
        }
        .into();
        assert!(err.is_program_not_found());
    }
}
