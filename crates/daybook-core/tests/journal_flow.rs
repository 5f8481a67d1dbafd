/// End-to-end journal flow: register a user, submit entries, list them
/// back, and check the credential and feedback edge cases along the way.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use daybook_core::clock::FixedClock;
use daybook_core::credentials::CredentialStore;
use daybook_core::error::Error;
use daybook_core::export::format_entry;
use daybook_core::feedback::{FeedbackClient, FeedbackError};
use daybook_core::service::EntryService;
use daybook_db::Database;

struct CannedFeedback(&'static str);

impl FeedbackClient for CannedFeedback {
    fn get_feedback(&self, _entry_text: &str) -> Result<String, FeedbackError> {
        Ok(self.0.to_string())
    }
}

struct FailingFeedback;

impl FeedbackClient for FailingFeedback {
    fn get_feedback(&self, _entry_text: &str) -> Result<String, FeedbackError> {
        Err(FeedbackError::Request("connection refused".into()))
    }
}

/// Fails the test if the service ever consults it.
struct UnreachableFeedback;

impl FeedbackClient for UnreachableFeedback {
    fn get_feedback(&self, _entry_text: &str) -> Result<String, FeedbackError> {
        panic!("feedback client must not be called");
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service_on(
    db: &Arc<Database>,
    feedback: Arc<dyn FeedbackClient>,
    today: NaiveDate,
    export_dir: PathBuf,
) -> EntryService {
    EntryService::new(db.clone(), feedback, Arc::new(FixedClock(today)), export_dir)
}

#[test]
fn register_submit_list_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::open_in_memory().unwrap());
    let credentials = CredentialStore::new(db.clone());

    credentials.create_user("bob", "secret123").unwrap();
    assert!(!credentials.verify("bob", "wrongpass").unwrap());
    assert!(credentials.verify("bob", "secret123").unwrap());

    let service = service_on(
        &db,
        Arc::new(UnreachableFeedback),
        day(2025, 1, 3),
        dir.path().to_path_buf(),
    );
    let submission = service
        .submit("bob", "good", "sun", "sleep more", "ok day", false)
        .unwrap();
    assert!(submission.feedback_error.is_none());

    let entries = service.entries_for("bob").unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.username, "bob");
    assert_eq!(entry.entry_date, day(2025, 1, 3));
    assert_eq!(entry.mood, "good");
    assert_eq!(entry.gratitude, "sun");
    assert_eq!(entry.room_for_growth, "sleep more");
    assert_eq!(entry.thoughts, "ok day");
    assert_eq!(entry.ai_feedback, None);
    assert_eq!(*entry, submission.entry);
}

#[test]
fn feedback_failure_still_persists_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::open_in_memory().unwrap());
    CredentialStore::new(db.clone())
        .create_user("bob", "secret123")
        .unwrap();

    let service = service_on(
        &db,
        Arc::new(FailingFeedback),
        day(2025, 1, 3),
        dir.path().to_path_buf(),
    );
    let submission = service
        .submit("bob", "good", "sun", "sleep more", "ok day", true)
        .unwrap();

    assert!(matches!(
        submission.feedback_error,
        Some(FeedbackError::Request(_))
    ));
    assert_eq!(submission.entry.ai_feedback, None);

    let entries = service.entries_for("bob").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ai_feedback, None);
}

#[test]
fn feedback_success_is_stored_and_exported() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::open_in_memory().unwrap());
    CredentialStore::new(db.clone())
        .create_user("bob", "secret123")
        .unwrap();

    let service = service_on(
        &db,
        Arc::new(CannedFeedback("Keep the streak going.")),
        day(2025, 1, 3),
        dir.path().to_path_buf(),
    );
    let submission = service
        .submit("bob", "good", "sun", "sleep more", "ok day", true)
        .unwrap();

    assert!(submission.feedback_error.is_none());
    assert_eq!(
        submission.entry.ai_feedback.as_deref(),
        Some("Keep the streak going.")
    );

    // Export mirrors format_entry byte for byte, feedback included
    let path = submission.export_path.expect("export should succeed");
    assert_eq!(path.file_name().unwrap(), "journal_2025-01-03.txt");
    let contents = fs::read_to_string(path).unwrap();
    assert_eq!(contents, format_entry(&submission.entry));
    assert!(contents.contains("\nAI Feedback:\nKeep the streak going."));
}

#[test]
fn duplicate_registration_keeps_the_original_password() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let credentials = CredentialStore::new(db);

    credentials.create_user("alice", "pw").unwrap();
    let err = credentials.create_user("alice", "anything").unwrap_err();
    assert!(matches!(err, Error::UsernameTaken));

    assert!(credentials.verify("alice", "pw").unwrap());
    assert!(!credentials.verify("alice", "anything").unwrap());
}

#[test]
fn listing_by_date_filters_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::open_in_memory().unwrap());
    CredentialStore::new(db.clone())
        .create_user("alice", "pw")
        .unwrap();

    for (today, thoughts) in [
        (day(2025, 1, 2), "yesterday"),
        (day(2025, 1, 3), "first of the day"),
        (day(2025, 1, 3), "second of the day"),
    ] {
        let service = service_on(
            &db,
            Arc::new(UnreachableFeedback),
            today,
            dir.path().to_path_buf(),
        );
        service
            .submit("alice", "good", "sun", "sleep more", thoughts, false)
            .unwrap();
    }

    let reader = service_on(
        &db,
        Arc::new(UnreachableFeedback),
        day(2025, 1, 4),
        dir.path().to_path_buf(),
    );

    let jan3: Vec<String> = reader
        .entries_for_date("alice", day(2025, 1, 3))
        .unwrap()
        .into_iter()
        .map(|e| e.thoughts)
        .collect();
    assert_eq!(jan3, ["first of the day", "second of the day"]);

    assert!(
        reader
            .entries_for_date("alice", day(2024, 6, 1))
            .unwrap()
            .is_empty()
    );

    // Full listing: newest day first, insertion order within a day
    let all: Vec<String> = reader
        .entries_for("alice")
        .unwrap()
        .into_iter()
        .map(|e| e.thoughts)
        .collect();
    assert_eq!(all, ["first of the day", "second of the day", "yesterday"]);
}
