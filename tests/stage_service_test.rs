//! Tests for stage registration and clears through the service layer.

use kyouen::{Board, EncodingError, FloatPoint, ValidationError};
use tempfile::NamedTempFile;

use kyouen_server::{ServerConfig, ServiceError, StageRepository, StageService};

const STAGE: &str = "000000010000001100001100000000001000";

/// `STAGE` with its square kyouen marked.
const CLEARED: &str = "000000010000002200002200000000001000";

fn setup_service() -> (NamedTempFile, StageService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = StageRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    (db_file, StageService::new(repo, ServerConfig::default()))
}

#[test]
fn test_create_stage() {
    let (_db, service) = setup_service();
    let registration = service.create_stage(6, STAGE, "alice").expect("Create failed");
    assert_eq!(registration.record().stage(), STAGE);
    assert_eq!(registration.record().creator(), "alice");
    assert!(!registration.kyouen().is_line());
}

#[test]
fn test_create_stage_rejects_rotated_duplicate() {
    let (_db, service) = setup_service();
    service.create_stage(6, STAGE, "alice").expect("Create failed");

    let rotated = Board::parse(6, STAGE)
        .expect("valid stage")
        .rotate90()
        .to_stage_string();
    let err = service.create_stage(6, &rotated, "bob").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateStage)
    ));
    assert_eq!(service.repository().count_stages().expect("Count failed"), 1);
}

#[test]
fn test_create_stage_rejects_bad_input() {
    let (_db, service) = setup_service();

    let err = service.create_stage(6, "0101", "alice").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidEncoding(
            EncodingError::LengthMismatch { .. }
        ))
    ));

    let err = service
        .create_stage(6, "000000000000001100001100000000000000", "alice")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InsufficientStones { .. })
    ));

    let err = service
        .create_stage(6, "000000010000000100001100000000001000", "alice")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NoKyouenFound)
    ));
}

#[test]
fn test_clear_stage() {
    let (_db, service) = setup_service();
    let registration = service.create_stage(6, STAGE, "alice").expect("Create failed");
    let stage_no = *registration.record().stage_no();

    let outcome = service
        .clear_stage(stage_no, CLEARED, "bob")
        .expect("Clear failed");
    assert!(*outcome.newly_recorded());
    assert_eq!(outcome.kyouen().center(), Some(FloatPoint::new(2.5, 2.5)));

    let again = service
        .clear_stage(stage_no, CLEARED, "bob")
        .expect("Clear failed");
    assert!(!*again.newly_recorded());

    let stats = service.stats(Some("bob")).expect("Stats failed");
    assert_eq!(*stats.stage_count(), 1);
    assert_eq!(stats.clears().len(), 1);
}

#[test]
fn test_clear_stage_errors() {
    let (_db, service) = setup_service();
    let registration = service.create_stage(6, STAGE, "alice").expect("Create failed");
    let stage_no = *registration.record().stage_no();

    let err = service.clear_stage(99, CLEARED, "bob").unwrap_err();
    assert!(matches!(err, ServiceError::StageNotFound(99)));

    // Marks form a kyouen but the stones differ from the registered stage.
    let err = service
        .clear_stage(stage_no, "000000000000002200002200000000001000", "bob")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::StageMismatch)
    ));

    let err = service.clear_stage(stage_no, STAGE, "bob").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InsufficientStones {
            expected: 4,
            actual: 0
        })
    ));

    let err = service.clear_stage(stage_no, "00000", "bob").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidEncoding(
            EncodingError::NotSquare { length: 5 }
        ))
    ));
}

#[test]
fn test_list_stages_applies_limits() {
    let (_db, service) = setup_service();
    for stage in [
        "000000010000001100001100000000001000",
        "000000000000000100010010001100000000",
        "000000001000010000000100010010001000",
    ] {
        service.create_stage(6, stage, "alice").expect("Create failed");
    }

    assert_eq!(service.list_stages(None, None).expect("List failed").len(), 3);
    assert_eq!(service.list_stages(None, Some(0)).expect("List failed").len(), 1);
    assert_eq!(service.list_stages(Some(3), None).expect("List failed").len(), 1);
    let recent = service.recent_stages(Some(1)).expect("List failed");
    assert_eq!(*recent[0].stage_no(), 3);
}

#[test]
fn test_create_stage_rejects_marked_stones() {
    let (_db, service) = setup_service();
    let err = service.create_stage(6, CLEARED, "alice").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MarkedStones { count: 4 })
    ));
    assert_eq!(service.repository().count_stages().expect("Count failed"), 0);
}

#[test]
fn test_sync_clears_skips_unknown_stages() {
    let (_db, service) = setup_service();
    let first = service.create_stage(6, STAGE, "alice").expect("Create failed");
    let second = service
        .create_stage(6, "000000000000000100010010001100000000", "alice")
        .expect("Create failed");
    let first_no = *first.record().stage_no();
    let second_no = *second.record().stage_no();

    service
        .clear_stage(first_no, CLEARED, "bob")
        .expect("Clear failed");

    let clears = service
        .sync_clears("bob", &[first_no, 42, second_no, second_no])
        .expect("Sync failed");
    let numbers: Vec<i32> = clears.iter().map(|c| *c.stage_no()).collect();
    assert_eq!(numbers, vec![first_no, second_no]);
    assert!(clears.iter().all(|c| c.user_name() == "bob"));

    let clears = service.sync_clears("bob", &[]).expect("Sync failed");
    assert_eq!(clears.len(), 2);
}

#[test]
fn test_recent_clears_spans_users() {
    let (_db, service) = setup_service();
    let stage_no = *service
        .create_stage(6, STAGE, "alice")
        .expect("Create failed")
        .record()
        .stage_no();

    service.sync_clears("bob", &[stage_no]).expect("Sync failed");
    service.sync_clears("carol", &[stage_no]).expect("Sync failed");

    let recent = service.recent_clears(None).expect("List failed");
    let users: Vec<&str> = recent.iter().map(|c| c.user_name().as_str()).collect();
    assert_eq!(users, vec!["carol", "bob"]);

    let recent = service.recent_clears(Some(1)).expect("List failed");
    assert_eq!(recent.len(), 1);
}
