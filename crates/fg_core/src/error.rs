use thiserror::Error;

/// Fatal engine errors.
///
/// Recoverable move failures are not errors; they come back as
/// `MoveResult { success: false, .. }` so callers can prompt or retry.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("insufficient dataset: need at least 9 records, found {found}")]
    InsufficientDataset { found: usize },

    #[error("dataset load failed: {0}")]
    DatasetLoad(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
