//! Tests for stage repository operations.

use kyouen::StageRegistry;
use tempfile::NamedTempFile;

use kyouen_server::{DbOperation, NewStage, StageRepository};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, StageRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = StageRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    (db_file, repo)
}

fn new_stage(stage: &str) -> NewStage {
    NewStage::new(6, stage.to_string(), "tester".to_string())
}

#[test]
fn test_create_stage_assigns_numbers() {
    let (_db, repo) = setup_test_db();
    let first = repo
        .create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");
    let second = repo
        .create_stage(new_stage("000000000000000100010010001100000000"))
        .expect("Create failed");
    assert_eq!(*first.stage_no(), 1);
    assert_eq!(*second.stage_no(), 2);
    assert_eq!(first.creator(), "tester");
    assert_eq!(*first.size(), 6);
}

#[test]
fn test_create_stage_duplicate_string_fails() {
    let (_db, repo) = setup_test_db();
    repo.create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("First create failed");
    let result = repo.create_stage(new_stage("000000010000001100001100000000001000"));
    assert!(result.is_err(), "Duplicate stage should fail");
}

#[test]
fn test_stage_exists() {
    let (_db, repo) = setup_test_db();
    repo.create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");
    assert!(
        repo.stage_exists("000000010000001100001100000000001000")
            .expect("Query failed")
    );
    assert!(
        !repo
            .stage_exists("000000000000000100010010001100000000")
            .expect("Query failed")
    );
}

#[test]
fn test_repository_is_a_registry() {
    let (_db, repo) = setup_test_db();
    repo.create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");
    assert!(
        repo.exists("000000010000001100001100000000001000")
            .expect("Lookup failed")
    );
}

#[test]
fn test_registry_error_on_unreachable_database() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("no_such_dir").join("kyouen.db");
    let repo = StageRepository::new(missing.to_str().expect("Invalid path").to_string())
        .expect("Failed to create repository");
    assert!(repo.exists("0").is_err());
}

#[test]
fn test_get_stage_by_no() {
    let (_db, repo) = setup_test_db();
    let created = repo
        .create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");
    let found = repo
        .get_stage_by_no(*created.stage_no())
        .expect("Query failed")
        .expect("Stage missing");
    assert_eq!(found.stage(), "000000010000001100001100000000001000");
    assert!(repo.get_stage_by_no(99).expect("Query failed").is_none());
}

#[test]
fn test_list_stages_pages_from_start() {
    let (_db, repo) = setup_test_db();
    for stage in [
        "000000010000001100001100000000001000",
        "000000000000000100010010001100000000",
        "000000001000010000000100010010001000",
    ] {
        repo.create_stage(new_stage(stage)).expect("Create failed");
    }

    let page = repo.list_stages(2, 10).expect("List failed");
    let numbers: Vec<i32> = page.iter().map(|s| *s.stage_no()).collect();
    assert_eq!(numbers, vec![2, 3]);

    let page = repo.list_stages(0, 2).expect("List failed");
    let numbers: Vec<i32> = page.iter().map(|s| *s.stage_no()).collect();
    assert_eq!(numbers, vec![1, 2]);

    let recent = repo.recent_stages(2).expect("List failed");
    let numbers: Vec<i32> = recent.iter().map(|s| *s.stage_no()).collect();
    assert_eq!(numbers, vec![3, 2]);

    assert_eq!(repo.count_stages().expect("Count failed"), 3);
}

#[test]
fn test_record_clear_is_idempotent() {
    let (_db, repo) = setup_test_db();
    let stage = repo
        .create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");

    assert!(repo.record_clear(*stage.stage_no(), "alice").expect("Record failed"));
    assert!(!repo.record_clear(*stage.stage_no(), "alice").expect("Record failed"));
    assert!(repo.record_clear(*stage.stage_no(), "bob").expect("Record failed"));

    let clears = repo.clears_by_user("alice").expect("Query failed");
    assert_eq!(clears.len(), 1);
    assert_eq!(clears[0].stage_no(), stage.stage_no());
    assert!(repo.clears_by_user("carol").expect("Query failed").is_empty());
}

#[test]
fn test_recent_clears_newest_first() {
    let (_db, repo) = setup_test_db();
    let first = repo
        .create_stage(new_stage("000000010000001100001100000000001000"))
        .expect("Create failed");
    let second = repo
        .create_stage(new_stage("000000000000000100010010001100000000"))
        .expect("Create failed");

    repo.record_clear(*first.stage_no(), "alice").expect("Record failed");
    repo.record_clear(*second.stage_no(), "bob").expect("Record failed");
    repo.record_clear(*first.stage_no(), "bob").expect("Record failed");

    let recent = repo.recent_clears(2).expect("Query failed");
    let pairs: Vec<(i32, &str)> = recent
        .iter()
        .map(|c| (*c.stage_no(), c.user_name().as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![(*first.stage_no(), "bob"), (*second.stage_no(), "bob")]
    );
}

#[test]
fn test_error_names_failed_operation() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("no_such_dir").join("kyouen.db");
    let repo = StageRepository::new(missing.to_str().expect("Invalid path").to_string())
        .expect("Failed to create repository");
    let err = repo.count_stages().unwrap_err();
    assert_eq!(err.operation, DbOperation::Connect);
    assert!(err.to_string().starts_with("Failed to open database"));
}
