//! Exit status codes for the CLI
//!
//! - 0: every entry was processed
//! - 1: any error (unreadable catalogue, failed command, invalid JSON response)
//! - 130: user interrupted (Ctrl+C, standard SIGINT exit code)

use std::process::{ExitCode, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Batch completed
    Success = 0,
    /// Batch aborted by an error
    Error = 1,
    /// Stopped by Ctrl+C
    Interrupted = 130,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Error.code(), 1);
        assert_eq!(ExitStatus::Interrupted.code(), 130);
    }
}
