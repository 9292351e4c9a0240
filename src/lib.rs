//! Kyouen stage registry.
//!
//! Stores kyouen puzzle stages and enforces the acceptance rules from the
//! [`kyouen`] crate: new stages need a kyouen and must not repeat a
//! registered stage in any rotation or reflection; clears must mark
//! exactly four stones that form a kyouen on a registered stage.
//!
//! # Architecture
//!
//! - **Db**: SQLite persistence via diesel; the repository is the
//!   [`kyouen::StageRegistry`] used for duplicate checks
//! - **Service**: registration, clears, listing and statistics
//! - **Config**: TOML configuration with environment override
//!
//! # Example
//!
//! ```no_run
//! use kyouen_server::{ServerConfig, StageRepository, StageService};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let repository = StageRepository::new(config.db_path().clone())?;
//! repository.migrate()?;
//!
//! let service = StageService::new(repository, config);
//! let registration = service.create_stage(6, "000000010000001100001100000000001000", "alice")?;
//! println!("registered stage {}", registration.record().stage_no());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod service;

// Crate-level exports - Configuration
pub use config::{ConfigError, DB_PATH_ENV, ServerConfig};

// Crate-level exports - Persistence
pub use db::{DbError, DbOperation, NewStage, NewStageClear, StageClear, StageRecord, StageRepository};

// Crate-level exports - Service
pub use service::{ClearOutcome, Registration, ServiceError, StageService, Stats};
