//! Exhaustive kyouen search over stone sets.

use crate::{Board, KyouenResult, Point, check_kyouen};
use tracing::{debug, instrument, trace};

/// Number of stones in a kyouen.
pub const KYOUEN_SIZE: usize = 4;

/// Returns the first kyouen among `stones`.
///
/// Quadruples `i < j < k < l` are tested in lexicographic order and the
/// search stops at the first hit, so the result is deterministic for a
/// given stone order.
#[instrument(skip(stones), fields(stones = stones.len()))]
pub fn find_any(stones: &[Point]) -> Option<KyouenResult> {
    let n = stones.len();
    let mut tested = 0usize;
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                for l in k + 1..n {
                    tested += 1;
                    if let Some(result) = check_kyouen(stones[i], stones[j], stones[k], stones[l]) {
                        trace!(i, j, k, l, "Kyouen hit");
                        debug!(tested, shape = %result.shape(), "Kyouen found");
                        return Some(result);
                    }
                }
            }
        }
    }
    debug!(tested, "No kyouen");
    None
}

/// Tests exactly the four given stones, in their stored order.
///
/// Any other number of stones yields `None` without testing.
#[instrument(skip(stones), fields(stones = stones.len()))]
pub fn check_exact(stones: &[Point]) -> Option<KyouenResult> {
    match *stones {
        [p1, p2, p3, p4] => check_kyouen(p1, p2, p3, p4),
        _ => {
            debug!("Not exactly four stones");
            None
        }
    }
}

impl Board {
    /// First kyouen among the plain stones.
    pub fn find_kyouen(&self) -> Option<KyouenResult> {
        find_any(self.stones())
    }

    /// Kyouen formed by the marked stones, if there are exactly four.
    pub fn marked_kyouen(&self) -> Option<KyouenResult> {
        check_exact(self.marked())
    }
}
