use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No working 7-Zip executable could be found or launched.
    #[error("{0}")]
    ExecutableUnavailable(String),

    /// Exit code 1: the tool finished but reported a non-fatal problem.
    #[error("Warning: {stderr}")]
    ExternalToolWarning { stderr: String },

    /// Exit code 2.
    #[error("Fatal error: {stderr}")]
    ExternalToolFatalError { stderr: String },

    /// Exit code 7: the tool rejected its command line.
    #[error("Command line error: {stderr}")]
    ExternalToolUsageError { stderr: String },

    /// Exit code 8.
    #[error("Not enough memory for operation: {stderr}")]
    ExternalToolResourceError { stderr: String },

    /// Exit code 255.
    #[error("User stopped the process: {stderr}")]
    ExternalToolInterrupted { stderr: String },

    /// Any other failure status, including termination by signal (`code` is `None`).
    #[error("{}", tool_error_message(.code, .stderr))]
    ExternalToolError { code: Option<i32>, stderr: String },

    #[error("parse error: {line}")]
    ParseError { line: String },

    #[error("No such file: {0}")]
    NoEntry(String),

    #[error("unsupported mode {0:?}: archives can only be opened for reading")]
    UnsupportedMode(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// True for every failure derived from the external tool's exit status.
    pub fn is_external_tool_error(&self) -> bool {
        matches!(
            self,
            Error::ExternalToolWarning { .. }
                | Error::ExternalToolFatalError { .. }
                | Error::ExternalToolUsageError { .. }
                | Error::ExternalToolResourceError { .. }
                | Error::ExternalToolInterrupted { .. }
                | Error::ExternalToolError { .. }
        )
    }

    /// Captured stderr of the failed invocation, if this error came from one.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::ExternalToolWarning { stderr }
            | Error::ExternalToolFatalError { stderr }
            | Error::ExternalToolUsageError { stderr }
            | Error::ExternalToolResourceError { stderr }
            | Error::ExternalToolInterrupted { stderr }
            | Error::ExternalToolError { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

fn tool_error_message(code: &Option<i32>, stderr: &str) -> String {
    match (*code, stderr.is_empty()) {
        (_, false) => stderr.to_owned(),
        (Some(code), true) => format!("7-zip exited with code {code}"),
        (None, true) => "7-zip was terminated by a signal".to_owned(),
    }
}
