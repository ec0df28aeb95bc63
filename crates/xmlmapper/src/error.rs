use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed XML at byte {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("translation failed: {message}")]
    Translation { message: String },

    #[error("path `{path}` not found or not an object")]
    PathNotFound { path: String },

    #[error("score sum overflowed after accumulating {partial}")]
    ScoreOverflow { partial: i32 },

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Non-fatal conditions raised while summing `Score` elements.
///
/// `index` is the zero-based position of the element among all `Score`
/// elements in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreWarning {
    /// Trimmed text did not parse as an `i32`; the element was skipped.
    InvalidScore { index: usize, text: String },
    /// Adding this element would overflow; aggregation stopped at `partial`.
    Overflow { index: usize, partial: i32 },
}

impl core::fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScoreWarning::InvalidScore { index, text } => {
                write!(f, "invalid score #{} ({:?}), skipping", index, text)
            }
            ScoreWarning::Overflow { index, partial } => write!(
                f,
                "score #{} exceeds the integer range, stopping at {}",
                index, partial
            ),
        }
    }
}
