//! Stage boards and the compact `0`/`1`/`2` stage encoding.

use crate::{EncodingError, Point};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Contents of one grid cell in the stage encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Cell {
    /// No stone (`'0'`).
    Empty,
    /// A plain stone (`'1'`).
    Stone,
    /// A stone marked as part of a submitted solution (`'2'`).
    Marked,
}

impl Cell {
    /// Character used for this cell in the stage encoding.
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Stone => '1',
            Cell::Marked => '2',
        }
    }

    /// Decodes a stage character.
    pub fn from_char(c: char) -> Option<Self> {
        Cell::iter().find(|cell| cell.as_char() == c)
    }
}

/// An N×N stage with its stones.
///
/// Stones are kept in row-major order for parsed boards; transformed
/// boards keep the order of the board they were derived from. Boards are
/// immutable: symmetry transforms build new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    stones: Vec<Point>,
    marked: Vec<Point>,
}

impl Board {
    /// Creates a board from explicit stone lists.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] if `size` is zero or its square overflows, a stone lies outside
    /// the grid, or a list repeats a coordinate.
    #[instrument(skip(stones, marked), fields(stones = stones.len(), marked = marked.len()))]
    pub fn new(size: usize, stones: Vec<Point>, marked: Vec<Point>) -> Result<Self, EncodingError> {
        area(size)?;
        for list in [&stones, &marked] {
            let mut seen = HashSet::with_capacity(list.len());
            for &p in list {
                if !p.within(size) {
                    return Err(EncodingError::OutOfBounds(p));
                }
                if !seen.insert(p) {
                    return Err(EncodingError::DuplicateStone(p));
                }
            }
        }
        Ok(Self {
            size,
            stones,
            marked,
        })
    }

    /// Decodes a stage string of length `size * size`.
    ///
    /// Index `i` of the string is cell `(i % size, i / size)`. `'1'` cells
    /// become stones and `'2'` cells become marked stones, both collected
    /// in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] on a zero or oversized size, a length mismatch or a
    /// character outside `{0, 1, 2}`.
    #[instrument(skip(encoded), fields(len = encoded.len()))]
    pub fn parse(size: usize, encoded: &str) -> Result<Self, EncodingError> {
        let expected = area(size)?;
        let actual = encoded.chars().count();
        if actual != expected {
            return Err(EncodingError::LengthMismatch { expected, actual });
        }

        let mut stones = Vec::new();
        let mut marked = Vec::new();
        for (index, c) in encoded.chars().enumerate() {
            let cell = Cell::from_char(c).ok_or(EncodingError::InvalidCharacter { index, found: c })?;
            match cell {
                Cell::Empty => {}
                Cell::Stone => stones.push(Point::from_index(index, size)),
                Cell::Marked => marked.push(Point::from_index(index, size)),
            }
        }

        debug!(size, stones = stones.len(), marked = marked.len(), "Stage decoded");
        Ok(Self {
            size,
            stones,
            marked,
        })
    }

    /// Decodes a stage string, inferring the size from its length.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::NotSquare`] if the length is not a perfect
    /// square, otherwise whatever [`Board::parse`] reports.
    #[instrument(skip(encoded), fields(len = encoded.len()))]
    pub fn parse_square(encoded: &str) -> Result<Self, EncodingError> {
        let length = encoded.chars().count();
        let size = length.isqrt();
        if size == 0 || size * size != length {
            return Err(EncodingError::NotSquare { length });
        }
        Self::parse(size, encoded)
    }

    /// Encodes the board back into its stage string.
    ///
    /// Marked stones win over plain stones on the same cell.
    pub fn to_stage_string(&self) -> String {
        let mut cells = vec![Cell::Empty; self.size * self.size];
        for p in &self.stones {
            cells[p.to_index(self.size)] = Cell::Stone;
        }
        for p in &self.marked {
            cells[p.to_index(self.size)] = Cell::Marked;
        }
        cells.into_iter().map(Cell::as_char).collect()
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the plain stones.
    pub fn stones(&self) -> &[Point] {
        &self.stones
    }

    /// Returns the marked stones.
    pub fn marked(&self) -> &[Point] {
        &self.marked
    }

    /// Number of plain stones.
    pub fn stone_count(&self) -> usize {
        self.stones.len()
    }

    /// Returns the cell at `p`, or `None` if `p` is off the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        if !p.within(self.size) {
            None
        } else if self.marked.contains(&p) {
            Some(Cell::Marked)
        } else if self.stones.contains(&p) {
            Some(Cell::Stone)
        } else {
            Some(Cell::Empty)
        }
    }

    /// Folds marked stones back into plain stones.
    ///
    /// The result is the stage a solver was given: every occupied cell
    /// becomes a plain stone, in row-major order, with no marks.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn unmarked(&self) -> Self {
        let mut stones: Vec<Point> = self.stones.iter().chain(&self.marked).copied().collect();
        stones.sort_by_key(|p| p.to_index(self.size));
        stones.dedup();
        Self {
            size: self.size,
            stones,
            marked: Vec::new(),
        }
    }

    /// Builds a board of the same size with only the given plain stones.
    pub(crate) fn with_stones(&self, stones: Vec<Point>) -> Self {
        Self {
            size: self.size,
            stones,
            marked: Vec::new(),
        }
    }

    /// Formats the board as a grid, one row per line.
    pub fn display(&self) -> String {
        self.to_stage_string()
            .chars()
            .collect::<Vec<_>>()
            .chunks(self.size)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Number of cells on a board of side `size`.
fn area(size: usize) -> Result<usize, EncodingError> {
    match size.checked_mul(size) {
        Some(cells) if cells > 0 => Ok(cells),
        _ => Err(EncodingError::InvalidSize(size)),
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Board", 2)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("stage", &self.to_stage_string())?;
        state.end()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_stage_string())
    }
}
