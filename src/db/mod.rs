//! Database persistence layer for registered stages and clears.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbOperation};
pub use models::{NewStage, NewStageClear, StageClear, StageRecord};
pub use repository::StageRepository;
