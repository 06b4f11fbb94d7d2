use thiserror::Error;

/// Errors surfaced while acquiring diff input.
///
/// Parsing itself never fails; malformed lines are skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no diff provided on stdin")]
    NoInput,

    #[error("diff input is empty")]
    EmptyInput,

    #[error("failed to read diff input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
