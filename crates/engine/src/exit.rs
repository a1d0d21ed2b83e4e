use std::process::ExitStatus;

use crate::error::{Error, Result};

/// Exit codes documented by 7-Zip.
pub const EXIT_OK: i32 = 0;
pub const EXIT_WARNING: i32 = 1;
pub const EXIT_FATAL: i32 = 2;
pub const EXIT_USAGE: i32 = 7;
pub const EXIT_OUT_OF_MEMORY: i32 = 8;
pub const EXIT_USER_STOP: i32 = 255;

/// Translate a finished invocation into success or a typed failure.
///
/// `code` is `None` when the child was killed by a signal.
pub fn check_exit_code(code: Option<i32>, stderr: String) -> Result<()> {
    match code {
        Some(EXIT_OK) => Ok(()),
        Some(EXIT_WARNING) => Err(Error::ExternalToolWarning { stderr }),
        Some(EXIT_FATAL) => Err(Error::ExternalToolFatalError { stderr }),
        Some(EXIT_USAGE) => Err(Error::ExternalToolUsageError { stderr }),
        Some(EXIT_OUT_OF_MEMORY) => Err(Error::ExternalToolResourceError { stderr }),
        Some(EXIT_USER_STOP) => Err(Error::ExternalToolInterrupted { stderr }),
        other => Err(Error::ExternalToolError {
            code: other,
            stderr,
        }),
    }
}

pub fn check_exit_status(status: ExitStatus, stderr: String) -> Result<()> {
    check_exit_code(status.code(), stderr)
}

#[cfg(test)]
#[path = "exit_tests.rs"]
mod tests;
