//! Errors that decide the process exit status
//!
//! Everything else travels as `anyhow::Error` and exits 1.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a successful or user-cancelled run
pub const EXIT_OK: u8 = 0;
/// Exit status for unexpected failures
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when the interview is aborted (EOF / interrupt)
pub const EXIT_ABORTED: u8 = 130;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Terminal closed or interrupted mid-interview
    #[error("interview aborted")]
    Aborted,

    /// User declined the confirmation summary
    #[error("cancelled")]
    Cancelled,

    /// Rendering could not create or write part of the tree
    #[error("failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::Aborted => EXIT_ABORTED,
            ScaffoldError::Cancelled => EXIT_OK,
            ScaffoldError::Filesystem { .. } => EXIT_FAILURE,
        }
    }
}

/// Exit status for any error surfaced to `main`
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ScaffoldError>()
        .map(ScaffoldError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
