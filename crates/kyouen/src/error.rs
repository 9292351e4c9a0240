//! Error types for stage decoding, registry lookups and validation.

use crate::Point;
use derive_more::{Display, Error};
use tracing::instrument;

/// A stage string or stone list that does not describe a valid board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EncodingError {
    /// Board side length must be at least 1 and its square must fit in `usize`.
    #[display("Invalid board size: {}", _0)]
    InvalidSize(#[error(not(source))] usize),

    /// Stage length is not a perfect square, so no size can be inferred.
    #[display("Stage length {} is not a perfect square", length)]
    NotSquare {
        /// Length of the rejected string.
        length: usize,
    },

    /// Stage length does not equal `size * size`.
    #[display("Stage length must be {}, got {}", expected, actual)]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Length received.
        actual: usize,
    },

    /// A character other than `0`, `1` or `2`.
    #[display("Invalid character {:?} at index {}", found, index)]
    InvalidCharacter {
        /// Row-major index of the offending character.
        index: usize,
        /// The character itself.
        found: char,
    },

    /// A stone outside the grid.
    #[display("Stone {} lies outside the grid", _0)]
    OutOfBounds(#[error(not(source))] Point),

    /// The same cell listed twice.
    #[display("Duplicate stone at {}", _0)]
    DuplicateStone(#[error(not(source))] Point),
}

/// Failure reported by a [`StageRegistry`](crate::StageRegistry) lookup.
#[derive(Debug, Clone, Display, Error)]
#[display("Registry error: {} at {}:{}", message, file, line)]
pub struct RegistryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RegistryError {
    /// Creates a new registry error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Reason a stage submission or a clear submission was rejected.
#[derive(Debug, Clone, Display)]
pub enum ValidationError {
    /// The stage string could not be decoded.
    #[display("Invalid encoding: {}", _0)]
    InvalidEncoding(EncodingError),

    /// Too few stones for a new stage, or not exactly four marked stones
    /// for a clear.
    #[display("Expected {} stones, got {}", expected, actual)]
    InsufficientStones {
        /// What the rule requires (minimum for stages, exact for clears).
        expected: usize,
        /// What the board has.
        actual: usize,
    },

    /// A new stage carried marked stones, which only a clear may use.
    #[display("New stage has {} marked stones", count)]
    MarkedStones {
        /// Number of `2` cells in the submission.
        count: usize,
    },

    /// No four stones lie on a common circle or line.
    #[display("Stage has no kyouen")]
    NoKyouenFound,

    /// The stage, or one of its rotations or reflections, is already
    /// registered.
    #[display("Stage already exists")]
    DuplicateStage,

    /// A cleared board does not match the registered stage.
    #[display("Stage mismatch")]
    StageMismatch,

    /// The registry lookup failed.
    #[display("{}", _0)]
    Registry(RegistryError),
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EncodingError> for ValidationError {
    fn from(err: EncodingError) -> Self {
        Self::InvalidEncoding(err)
    }
}

impl From<RegistryError> for ValidationError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}
