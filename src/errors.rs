use std::error::Error;
use std::fmt;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported synchronously by the engine core.
///
/// Search cancellation is not an error and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Requested search depth is zero or above the hard ceiling.
    InvalidDepth { requested: u32, max: u32 },
    /// FEN text could not be tokenized.
    InvalidFen(String),
    /// Move text does not name a legal move of the current position.
    InvalidMoveText(String),
    InvalidConfig(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDepth { requested, max } => {
                write!(f, "invalid search depth {requested}: must be in 1..={max}")
            }
            EngineError::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            EngineError::InvalidMoveText(msg) => write!(f, "invalid move text: {msg}"),
            EngineError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for EngineError {}
