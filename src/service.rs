//! Stage registration and clear business logic.

use derive_getters::Getters;
use derive_more::Display;
use kyouen::{
    Board, EncodingError, KyouenResult, ValidationError, validate_clear, validate_new_stage,
    verify_clear_matches,
};
use tracing::{debug, info, instrument, warn};

use crate::{DbError, NewStage, ServerConfig, StageClear, StageRecord, StageRepository};

/// Failure of a stage service operation.
#[derive(Debug, Clone, Display)]
pub enum ServiceError {
    /// The submission broke a stage rule.
    #[display("{}", _0)]
    Validation(ValidationError),

    /// No stage has the requested number.
    #[display("Stage {} not found", _0)]
    StageNotFound(i32),

    /// Storage failed.
    #[display("{}", _0)]
    Db(DbError),
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Db(e) => Some(e),
            Self::StageNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<EncodingError> for ServiceError {
    fn from(err: EncodingError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// A freshly registered stage and the kyouen that made it valid.
#[derive(Debug, Clone, Getters)]
pub struct Registration {
    record: StageRecord,
    kyouen: KyouenResult,
}

/// Outcome of an accepted clear.
#[derive(Debug, Clone, Getters)]
pub struct ClearOutcome {
    stage_no: i32,
    kyouen: KyouenResult,
    newly_recorded: bool,
}

/// Registry summary.
#[derive(Debug, Clone, Getters)]
pub struct Stats {
    stage_count: i64,
    clears: Vec<StageClear>,
}

/// Service layer for stage operations.
///
/// Wraps [`StageRepository`] with the kyouen validation rules: the
/// repository doubles as the registry for duplicate checks.
#[derive(Debug, Clone)]
pub struct StageService {
    repository: StageRepository,
    config: ServerConfig,
}

impl StageService {
    /// Creates a new stage service backed by the given repository.
    #[instrument(skip(repository, config))]
    pub fn new(repository: StageRepository, config: ServerConfig) -> Self {
        info!("Creating StageService");
        Self { repository, config }
    }

    /// Returns the underlying repository.
    #[instrument(skip(self))]
    pub fn repository(&self) -> &StageRepository {
        &self.repository
    }

    /// Validates and registers a new stage.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the stage is malformed,
    /// carries marked stones, is too small, has no kyouen or is already registered in some
    /// orientation, and [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self, stage))]
    pub fn create_stage(&self, size: usize, stage: &str, creator: &str) -> Result<Registration, ServiceError> {
        let board = Board::parse(size, stage)?;
        let kyouen = validate_new_stage(&board, &self.repository)?;

        let size = i32::try_from(size).map_err(|_| EncodingError::InvalidSize(size))?;
        let new_stage = NewStage::new(size, board.to_stage_string(), creator.to_string());
        let record = self.repository.create_stage(new_stage)?;

        info!(stage_no = record.stage_no(), kyouen = %kyouen, "Stage created");
        Ok(Registration { record, kyouen })
    }

    /// Verifies a cleared stage and records the clear for `user_name`.
    ///
    /// The board size is inferred from the stage length. The four marked
    /// stones must form a kyouen, and the board with marks removed must
    /// be the registered stage `stage_no`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for a malformed or wrong
    /// clear, [`ServiceError::StageNotFound`] for an unknown number, and
    /// [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self, stage))]
    pub fn clear_stage(&self, stage_no: i32, stage: &str, user_name: &str) -> Result<ClearOutcome, ServiceError> {
        let board = Board::parse_square(stage)?;
        let kyouen = validate_clear(&board)?;

        let Some(registered) = self.repository.get_stage_by_no(stage_no)? else {
            warn!("Stage not found");
            return Err(ServiceError::StageNotFound(stage_no));
        };
        verify_clear_matches(&board, registered.stage())?;

        let newly_recorded = self.repository.record_clear(stage_no, user_name)?;
        info!(newly_recorded, "Stage cleared");
        Ok(ClearOutcome {
            stage_no,
            kyouen,
            newly_recorded,
        })
    }

    /// Lists stages from `start_stage_no` on, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self))]
    pub fn list_stages(&self, start_stage_no: Option<i32>, limit: Option<i64>) -> Result<Vec<StageRecord>, ServiceError> {
        let limit = self.config.page_limit(limit);
        let start = start_stage_no.unwrap_or(0);
        debug!(start, limit, "Listing stages");
        Ok(self.repository.list_stages(start, limit)?)
    }

    /// Lists the newest stages.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self))]
    pub fn recent_stages(&self, limit: Option<i64>) -> Result<Vec<StageRecord>, ServiceError> {
        let limit = self.config.page_limit(limit);
        Ok(self.repository.recent_stages(limit)?)
    }

    /// Records clears a client made offline and returns every clear the
    /// user has on record.
    ///
    /// Unknown stage numbers are skipped. Already recorded clears are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self, stage_nos), fields(submitted = stage_nos.len()))]
    pub fn sync_clears(&self, user_name: &str, stage_nos: &[i32]) -> Result<Vec<StageClear>, ServiceError> {
        let mut recorded = 0usize;
        for &stage_no in stage_nos {
            if self.repository.get_stage_by_no(stage_no)?.is_none() {
                debug!(stage_no, "Skipping unknown stage");
                continue;
            }
            if self.repository.record_clear(stage_no, user_name)? {
                recorded += 1;
            }
        }

        let clears = self.repository.clears_by_user(user_name)?;
        info!(recorded, total = clears.len(), "Clears synced");
        Ok(clears)
    }

    /// Lists the newest clears across all users.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self))]
    pub fn recent_clears(&self, limit: Option<i64>) -> Result<Vec<StageClear>, ServiceError> {
        let limit = self.config.page_limit(limit);
        Ok(self.repository.recent_clears(limit)?)
    }

    /// Returns the stage count and, for a given user, their clears.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Db`] if storage fails.
    #[instrument(skip(self))]
    pub fn stats(&self, user_name: Option<&str>) -> Result<Stats, ServiceError> {
        let stage_count = self.repository.count_stages()?;
        let clears = match user_name {
            Some(user) => self.repository.clears_by_user(user)?,
            None => Vec::new(),
        };
        Ok(Stats { stage_count, clears })
    }
}
