//! Acceptance rules for new stages and for cleared stages.

use crate::{Board, KYOUEN_SIZE, KyouenResult, StageRegistry, ValidationError, is_registered};
use tracing::{debug, info, instrument, warn};

/// Fewest stones a new stage may have.
pub const MIN_STAGE_STONES: usize = KYOUEN_SIZE + 1;

/// Checks a stage submitted for registration.
///
/// The stage must have no marked stones and more than four plain
/// stones, must contain a kyouen, and must not be registered in any
/// orientation. Returns the kyouen found.
///
/// # Errors
///
/// Returns [`ValidationError::MarkedStones`],
/// [`ValidationError::InsufficientStones`],
/// [`ValidationError::NoKyouenFound`], [`ValidationError::DuplicateStage`],
/// or the registry failure as [`ValidationError::Registry`].
#[instrument(skip(board, registry), fields(size = board.size(), stones = board.stone_count()))]
pub fn validate_new_stage<R: StageRegistry + ?Sized>(
    board: &Board,
    registry: &R,
) -> Result<KyouenResult, ValidationError> {
    if !board.marked().is_empty() {
        warn!(marked = board.marked().len(), "New stage has marked stones");
        return Err(ValidationError::MarkedStones {
            count: board.marked().len(),
        });
    }

    if board.stone_count() < MIN_STAGE_STONES {
        warn!("Too few stones");
        return Err(ValidationError::InsufficientStones {
            expected: MIN_STAGE_STONES,
            actual: board.stone_count(),
        });
    }

    let Some(kyouen) = board.find_kyouen() else {
        warn!("Stage has no kyouen");
        return Err(ValidationError::NoKyouenFound);
    };
    debug!(kyouen = %kyouen, "Kyouen present");

    if is_registered(board, registry)? {
        warn!("Stage already registered");
        return Err(ValidationError::DuplicateStage);
    }

    info!("Stage accepted");
    Ok(kyouen)
}

/// Checks a clear submission: the four marked stones must form a kyouen.
///
/// # Errors
///
/// Returns [`ValidationError::InsufficientStones`] unless exactly four
/// stones are marked, and [`ValidationError::NoKyouenFound`] if they do
/// not form a kyouen.
#[instrument(skip(board), fields(size = board.size(), marked = board.marked().len()))]
pub fn validate_clear(board: &Board) -> Result<KyouenResult, ValidationError> {
    if board.marked().len() != KYOUEN_SIZE {
        warn!("Clear needs exactly four marked stones");
        return Err(ValidationError::InsufficientStones {
            expected: KYOUEN_SIZE,
            actual: board.marked().len(),
        });
    }

    let kyouen = board.marked_kyouen().ok_or(ValidationError::NoKyouenFound)?;
    info!(kyouen = %kyouen, "Clear accepted");
    Ok(kyouen)
}

/// Checks that a cleared board is the registered stage with marks added.
///
/// # Errors
///
/// Returns [`ValidationError::StageMismatch`] if the board, with marked
/// stones folded back into plain stones, does not encode to `registered`.
#[instrument(skip(board, registered))]
pub fn verify_clear_matches(board: &Board, registered: &str) -> Result<(), ValidationError> {
    if board.unmarked().to_stage_string() == registered {
        Ok(())
    } else {
        warn!(submitted = %board, registered, "Cleared board differs from registered stage");
        Err(ValidationError::StageMismatch)
    }
}
