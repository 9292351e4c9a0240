//! Kyouen puzzle logic.
//!
//! A kyouen (共円) is a set of four stones lying on one circle or one
//! straight line. This crate decodes stages, searches them for kyouen,
//! and detects stages that are already registered in some rotation or
//! reflection.
//!
//! # Architecture
//!
//! - **Board**: stage codec and stone lists
//! - **Geometry**: the four-stone concyclic / collinear test
//! - **Search**: first kyouen among many stones, or exactly four marked ones
//! - **Symmetry**: rotations, mirror and the eight-board orbit
//! - **Duplicate**: orbit walk against a [`StageRegistry`]
//! - **Validation**: acceptance rules for new and cleared stages
//!
//! # Example
//!
//! ```
//! use kyouen::Board;
//!
//! let board = Board::parse(6, "000000010000001100001100000000001000")?;
//! let kyouen = board.find_kyouen().expect("stage has a kyouen");
//! assert!(!kyouen.is_line());
//! # Ok::<(), kyouen::EncodingError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod duplicate;
mod error;
mod geometry;
mod line;
mod point;
mod search;
mod symmetry;
mod validation;

// Crate-level exports - Data model
pub use board::{Board, Cell};
pub use line::Line;
pub use point::{FloatPoint, Point};

// Crate-level exports - Errors
pub use error::{EncodingError, RegistryError, ValidationError};

// Crate-level exports - Geometry and search
pub use geometry::{KyouenResult, KyouenShape, RADIUS_TOLERANCE, check_kyouen};
pub use search::{KYOUEN_SIZE, check_exact, find_any};

// Crate-level exports - Symmetry and duplicates
pub use duplicate::{StageRegistry, is_registered, orbit_exists};
pub use symmetry::Orbit;

// Crate-level exports - Validation
pub use validation::{MIN_STAGE_STONES, validate_clear, validate_new_stage, verify_clear_matches};
