//! Orientation-independent duplicate detection.

use crate::{Board, RegistryError};
use tracing::{debug, info, instrument};

/// Lookup of registered stages by their exact encoding.
///
/// Implementations may block on I/O. Timeouts and cancellation belong to
/// the implementation; lookups for one board are issued one at a time.
pub trait StageRegistry {
    /// Returns `true` if `stage` is registered verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the lookup itself failed.
    fn exists(&self, stage: &str) -> Result<bool, RegistryError>;
}

impl<R: StageRegistry + ?Sized> StageRegistry for &R {
    fn exists(&self, stage: &str) -> Result<bool, RegistryError> {
        (**self).exists(stage)
    }
}

/// Returns `true` if any of the eight symmetric variants of `board` is
/// registered according to `exists`.
///
/// Variants are queried sequentially in [`Board::orbit`] order. The walk
/// stops at the first `Ok(true)` and at the first error, which is
/// returned unchanged.
#[instrument(skip(board, exists), fields(size = board.size(), stones = board.stone_count()))]
pub fn orbit_exists<E, F>(board: &Board, mut exists: F) -> Result<bool, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    for (index, variant) in board.orbit().enumerate() {
        let stage = variant.to_stage_string();
        if exists(&stage)? {
            info!(index, stage = %stage, "Registered variant found");
            return Ok(true);
        }
    }
    debug!("No registered variant");
    Ok(false)
}

/// [`orbit_exists`] against a [`StageRegistry`].
///
/// # Errors
///
/// Returns the first [`RegistryError`] the registry reports.
pub fn is_registered<R: StageRegistry + ?Sized>(board: &Board, registry: &R) -> Result<bool, RegistryError> {
    orbit_exists(board, |stage| registry.exists(stage))
}
