//! Tests for error translation and orchestration in the tutor service.

use super::*;
use crate::domain::ports::MockTutorRepository;
use crate::domain::{ErrorCode, NewTutor, TutorChanges};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 23, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn tutor_id() -> TutorId {
    TutorId::new("6b0d3c1e-2f4a-4b8e-9c7d-1a2b3c4d5e6f").expect("valid id")
}

#[fixture]
fn payload() -> Value {
    json!({
        "name": "Grace",
        "email": "grace@example.com",
        "subject": "Computer Science",
        "subjects": ["Computer Science", "Math"],
        "hourlyRate": 55.5,
        "experience": 7,
        "location": "Arlington",
        "languages": ["English"],
        "bio": "Compilers, languages and tooling."
    })
}

fn stored(new_tutor: NewTutor) -> Tutor {
    Tutor::from_new(tutor_id(), new_tutor, fixture_now(), None)
}

fn missing_table<T>() -> Result<T, TutorRepositoryError> {
    Err(TutorRepositoryError::schema_missing("tutors"))
}

fn service(repository: MockTutorRepository) -> TutorService<MockTutorRepository> {
    TutorService::new(
        Arc::new(repository),
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        }),
    )
}

#[rstest]
#[tokio::test]
async fn create_applies_defaults_from_the_clock(payload: Value) {
    let mut repository = MockTutorRepository::new();
    repository
        .expect_create()
        .times(1)
        .withf(|new_tutor| {
            new_tutor.join_date == NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date")
                && new_tutor.is_active
                && !new_tutor.is_approved
        })
        .returning(|new_tutor| Ok(stored(new_tutor)));

    let tutor = service(repository)
        .create_tutor(payload)
        .await
        .expect("create succeeds");
    assert_eq!(tutor.id, tutor_id());
    assert_eq!(tutor.total_students, 0);
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_payload_without_touching_storage(payload: Value) {
    let mut repository = MockTutorRepository::new();
    repository.expect_create().never();

    let mut payload = payload;
    payload["email"] = json!("not-an-email");
    let error = service(repository)
        .create_tutor(payload)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), VALIDATION_ERROR_MESSAGE);
    let details = error.details().expect("violations attached");
    assert_eq!(details[0]["field"], "email");
    assert_eq!(details[0]["code"], "invalid_email");
}

#[rstest]
#[case(Operation::List)]
#[case(Operation::Get)]
#[case(Operation::Create)]
#[case(Operation::Update)]
#[tokio::test]
async fn schema_missing_maps_to_setup_guidance(payload: Value, #[case] operation: Operation) {
    let mut repository = MockTutorRepository::new();
    repository.expect_list().returning(|| missing_table());
    repository.expect_find().returning(|_| missing_table());
    repository.expect_create().returning(|_| missing_table());
    repository.expect_update().returning(|_, _| missing_table());
    let service = service(repository);
    let id = tutor_id();

    let error = match operation {
        Operation::List => service.list_tutors().await.map(|_| ()),
        Operation::Get => service.get_tutor(&id).await.map(|_| ()),
        Operation::Create => service.create_tutor(payload).await.map(|_| ()),
        Operation::Update => service
            .update_tutor(&id, json!({ "isActive": false }))
            .await
            .map(|_| ()),
        Operation::Delete => unreachable!("delete is not parametrised here"),
    }
    .expect_err("schema missing");

    assert_eq!(error.code(), ErrorCode::SchemaMissing);
    assert_eq!(error.message(), SCHEMA_MISSING_MESSAGE);
    let details = error.details().and_then(Value::as_str).expect("guidance");
    assert!(details.contains("tutors"));
}

#[rstest]
#[tokio::test]
async fn list_failure_passes_storage_message_through() {
    let mut repository = MockTutorRepository::new();
    repository
        .expect_list()
        .returning(|| Err(TutorRepositoryError::connection("connection refused")));

    let error = service(repository)
        .list_tutors()
        .await
        .expect_err("storage fails");
    assert_eq!(error.code(), ErrorCode::StorageError);
    assert_eq!(error.message(), "Failed to fetch tutors");
    assert_eq!(
        error.details(),
        Some(&json!("tutor repository connection failed: connection refused"))
    );
}

#[rstest]
#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let mut repository = MockTutorRepository::new();
    repository
        .expect_find()
        .returning(|id| Err(TutorRepositoryError::not_found(id.as_ref())));

    let error = service(repository)
        .get_tutor(&tutor_id())
        .await
        .expect_err("missing tutor");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), TUTOR_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn empty_update_reads_instead_of_writing(payload: Value) {
    let today = fixture_now().date_naive();
    let existing = stored(validate_new_tutor(&payload, today).expect("valid payload"));
    let expected = existing.clone();

    let mut repository = MockTutorRepository::new();
    repository.expect_update().never();
    repository
        .expect_find()
        .times(1)
        .returning(move |_| Ok(existing.clone()));

    let tutor = service(repository)
        .update_tutor(&tutor_id(), json!({ "unknown": true }))
        .await
        .expect("no-op update");
    assert_eq!(tutor, expected);
}

#[rstest]
#[tokio::test]
async fn update_forwards_only_validated_changes() {
    let mut repository = MockTutorRepository::new();
    repository.expect_update().times(1).returning(|_, changes| {
        assert_eq!(
            changes,
            TutorChanges {
                is_active: Some(false),
                ..TutorChanges::default()
            }
        );
        Err(TutorRepositoryError::not_found("gone"))
    });

    let error = service(repository)
        .update_tutor(&tutor_id(), json!({ "isActive": false, "joinDate": "2020-01-01" }))
        .await
        .expect_err("record vanished");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(TutorRepositoryError::not_found("gone"))]
#[case(TutorRepositoryError::schema_missing("tutors"))]
#[case(TutorRepositoryError::query("permission denied"))]
#[tokio::test]
async fn delete_failures_are_storage_errors(#[case] failure: TutorRepositoryError) {
    let expected_details = Value::String(failure.to_string());
    let mut repository = MockTutorRepository::new();
    repository
        .expect_delete()
        .returning(move |_| Err(failure.clone()));

    let error = service(repository)
        .delete_tutor(&tutor_id())
        .await
        .expect_err("delete fails");
    assert_eq!(error.code(), ErrorCode::StorageError);
    assert_eq!(error.message(), "Failed to delete tutor");
    assert_eq!(error.details(), Some(&expected_details));
}
