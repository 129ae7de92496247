// src/exit.rs
//! Standardized process exit codes for `tidyrun`.
//!
//! Provides a stable contract for scripts and CI jobs.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TidyExit {
    /// Every file was analyzed and fixes (if requested) were handled.
    Success = 0,
    /// A clang-tidy invocation failed, or exporting/applying fixes failed.
    Error = 1,
    /// Bad command line input (unreadable log, invalid file regex).
    InvalidInput = 2,
    /// `log --fail-on-findings` saw at least one finding.
    FindingsPresent = 3,
    /// Interrupted with Ctrl-C.
    Interrupted = 130,
}

impl TidyExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for TidyExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for TidyExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => {
                eprintln!("Error: {e}");
                Self::Error
            }
        }
    }
}
