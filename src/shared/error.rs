use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI pipelines use these to tell a regression apart from a broken run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - trend computed (or no trend yet)
    Success = 0,
    /// `--fail-on-new` was given and the latest scan introduced vulnerabilities
    NewVulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable scan file, bad config, state file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NewVulnerabilitiesDetected => write!(f, "New Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the history store and the pure trend services.
///
/// Having too little history for a trend is deliberately absent here: it is a
/// normal state reported through `TrendOutcome`, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrendError {
    /// A mutating operation received a missing key, a mismatched snapshot,
    /// or a snapshot that would break timestamp ordering.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A raw scan result could not be normalized into a snapshot.
    #[error("Invalid scan input: {message}\n\n💡 Hint: Verify that the scan result carries a project identity and complete dependency coordinates")]
    InvalidInput { message: String },
}

impl TrendError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        TrendError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        TrendError::InvalidInput {
            message: message.into(),
        }
    }
}
