//! Database repository for registered stages and clears.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use kyouen::{RegistryError, StageRegistry};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbOperation, NewStage, NewStageClear, StageClear, StageRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for stage operations.
#[derive(Debug, Clone)]
pub struct StageRepository {
    db_path: String,
}

impl StageRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.is_empty() {
            return Err(DbError::new(DbOperation::Connect, "database path is empty"));
        }
        info!(path = %db_path, "Creating StageRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(DbOperation::Connect, format!("'{}': {}", self.db_path, e)))
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbOperation::Migrate, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Registers a new stage and returns it with its assigned number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the exact stage string is already stored or a
    /// database error occurs.
    #[instrument(skip(self, stage), fields(size = stage.size(), creator = %stage.creator()))]
    pub fn create_stage(&self, stage: NewStage) -> Result<StageRecord, DbError> {
        debug!("Inserting stage");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::stages::table)
            .values(&stage)
            .returning(StageRecord::as_returning())
            .get_result(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::InsertStage, e))?;

        info!(stage_no = record.stage_no(), "Stage registered");
        Ok(record)
    }

    /// Returns `true` if the exact stage string is stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn stage_exists(&self, stage: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let exists = diesel::select(diesel::dsl::exists(
            schema::stages::table.filter(schema::stages::stage.eq(stage)),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(|e| DbError::diesel(DbOperation::LookupStage, e))?;

        debug!(exists, "Stage lookup");
        Ok(exists)
    }

    /// Gets a stage by number. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_stage_by_no(&self, stage_no: i32) -> Result<Option<StageRecord>, DbError> {
        let mut conn = self.connection()?;

        let record = schema::stages::table
            .find(stage_no)
            .select(StageRecord::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DbError::diesel(DbOperation::LookupStage, e))?;

        debug!(found = record.is_some(), "Stage by number");
        Ok(record)
    }

    /// Lists up to `limit` stages numbered `start_stage_no` or higher, in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_stages(&self, start_stage_no: i32, limit: i64) -> Result<Vec<StageRecord>, DbError> {
        let mut conn = self.connection()?;

        let stages = schema::stages::table
            .filter(schema::stages::stage_no.ge(start_stage_no))
            .order(schema::stages::stage_no.asc())
            .limit(limit)
            .select(StageRecord::as_select())
            .load(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::ListStages, e))?;

        info!(count = stages.len(), "Stages loaded");
        Ok(stages)
    }

    /// Lists the `limit` most recently registered stages, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_stages(&self, limit: i64) -> Result<Vec<StageRecord>, DbError> {
        let mut conn = self.connection()?;

        let stages = schema::stages::table
            .order(schema::stages::stage_no.desc())
            .limit(limit)
            .select(StageRecord::as_select())
            .load(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::ListStages, e))?;

        info!(count = stages.len(), "Recent stages loaded");
        Ok(stages)
    }

    /// Number of registered stages.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_stages(&self) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        let count: i64 = schema::stages::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::ListStages, e))?;
        debug!(count, "Stages counted");
        Ok(count)
    }

    /// Records that `user_name` cleared a stage.
    ///
    /// Returns `false` if the clear was already recorded.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_clear(&self, stage_no: i32, user_name: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let inserted = diesel::insert_or_ignore_into(schema::stage_clears::table)
            .values(&NewStageClear::new(stage_no, user_name.to_string()))
            .execute(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::RecordClear, e))?;

        info!(stage_no, user = %user_name, new = inserted > 0, "Clear recorded");
        Ok(inserted > 0)
    }

    /// Gets all clears by a user, ordered by stage number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clears_by_user(&self, user_name: &str) -> Result<Vec<StageClear>, DbError> {
        let mut conn = self.connection()?;

        let clears = schema::stage_clears::table
            .filter(schema::stage_clears::user_name.eq(user_name))
            .order(schema::stage_clears::stage_no.asc())
            .select(StageClear::as_select())
            .load(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::ListClears, e))?;

        info!(user = %user_name, count = clears.len(), "Clears loaded");
        Ok(clears)
    }

    /// Lists the `limit` most recent clears across all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_clears(&self, limit: i64) -> Result<Vec<StageClear>, DbError> {
        let mut conn = self.connection()?;

        // cleared_at has one-second resolution; id breaks ties.
        let clears = schema::stage_clears::table
            .order((
                schema::stage_clears::cleared_at.desc(),
                schema::stage_clears::id.desc(),
            ))
            .limit(limit)
            .select(StageClear::as_select())
            .load(&mut conn)
            .map_err(|e| DbError::diesel(DbOperation::ListClears, e))?;

        info!(count = clears.len(), "Recent clears loaded");
        Ok(clears)
    }
}

impl StageRegistry for StageRepository {
    fn exists(&self, stage: &str) -> Result<bool, RegistryError> {
        self.stage_exists(stage).map_err(RegistryError::from)
    }
}
