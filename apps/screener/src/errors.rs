use thiserror::Error;

use crate::oracle::OracleError;

/// Application-level error type.
///
/// `EmptyPosting` is the one user-facing terminal condition: a posting the
/// oracle could not extract a single requirement from ends the session with
/// a message rather than a stack trace.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("No requirements could be extracted from the job posting. Check the input text.")]
    EmptyPosting,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
