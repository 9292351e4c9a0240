//! Rotations and reflections of a board (the dihedral group D4).
//!
//! Only plain stones are transformed. Marked stones matter for clear
//! checks, which never look at transformed boards, so transformed boards
//! carry none.

use crate::{Board, Point};
use tracing::instrument;

impl Board {
    /// Rotates the board 90° clockwise: `(x, y)` becomes `(size-1-y, x)`.
    pub fn rotate90(&self) -> Self {
        let last = self.size() - 1;
        let stones = self
            .stones()
            .iter()
            .map(|p| Point::new(last - p.y(), p.x()))
            .collect();
        self.with_stones(stones)
    }

    /// Reflects the board horizontally: `(x, y)` becomes `(size-1-x, y)`.
    pub fn mirror(&self) -> Self {
        let last = self.size() - 1;
        let stones = self
            .stones()
            .iter()
            .map(|p| Point::new(last - p.x(), p.y()))
            .collect();
        self.with_stones(stones)
    }

    /// Walks the eight symmetric variants of this board.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn orbit(&self) -> Orbit {
        Orbit::new(self)
    }
}

/// Iterator over the D4 orbit of a board.
///
/// Starting from `current = board`, each of four rounds yields
/// `mirror(current)` and then `current = rotate90(current)`. The order is
/// `M(B0), B1, M(B1), B2, M(B2), B3, M(B3), B0`: the untouched board
/// comes last.
#[derive(Debug, Clone)]
pub struct Orbit {
    current: Board,
    step: usize,
}

impl Orbit {
    /// Number of boards in an orbit.
    pub const LEN: usize = 8;

    fn new(board: &Board) -> Self {
        Self {
            current: board.clone(),
            step: 0,
        }
    }
}

impl Iterator for Orbit {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        if self.step >= Self::LEN {
            return None;
        }
        let item = if self.step % 2 == 0 {
            self.current.mirror()
        } else {
            self.current = self.current.rotate90();
            self.current.clone()
        };
        self.step += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Self::LEN - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Orbit {}

impl std::iter::FusedIterator for Orbit {}
