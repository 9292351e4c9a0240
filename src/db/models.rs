//! Database models for registered stages and clears.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema;

/// A registered stage.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::stages)]
#[diesel(primary_key(stage_no))]
pub struct StageRecord {
    stage_no: i32,
    size: i32,
    stage: String,
    creator: String,
    regist_date: NaiveDateTime,
}

/// Insertable stage for registering a new puzzle.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::stages)]
pub struct NewStage {
    size: i32,
    stage: String,
    creator: String,
}

/// A user's clear of a stage.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::stage_clears)]
#[diesel(belongs_to(StageRecord, foreign_key = stage_no))]
pub struct StageClear {
    id: i32,
    stage_no: i32,
    user_name: String,
    cleared_at: NaiveDateTime,
}

/// Insertable clear record.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::stage_clears)]
pub struct NewStageClear {
    stage_no: i32,
    user_name: String,
}
