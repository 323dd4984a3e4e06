//! Onboarding lifecycle integration tests.
//!
//! These tests verify the complete customer lifecycle through the core
//! components: onboard -> status transitions -> stream observation.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tempfile::TempDir;

use concierge_core::{
    testing::MockTracker, CustomerStore, FormKeyGate, Onboarder, OnboardingError,
    SqliteCustomerStore, StatusMachine, StatusPublisher, TicketTracker, STATUS_CREATED,
    STATUS_DB_UPDATED, STATUS_INITIALIZING,
};

const KEY: &str = "0123456789abcdef0123456789ab";

/// Test helper wiring all core components around one file-backed store.
struct TestHarness {
    store: Arc<dyn CustomerStore>,
    tracker: Arc<MockTracker>,
    onboarder: Onboarder,
    machine: StatusMachine,
    publisher: StatusPublisher,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let store: Arc<dyn CustomerStore> = Arc::new(
            SqliteCustomerStore::new(&db_path).expect("Failed to create customer store"),
        );
        let tracker = Arc::new(MockTracker::new());

        let onboarder = Onboarder::new(
            FormKeyGate::new(Some(KEY.to_string())),
            Arc::clone(&store),
        )
        .with_tracker(
            Arc::clone(&tracker) as Arc<dyn TicketTracker>,
            "https://forms.example.com",
        );

        let machine = StatusMachine::new(Arc::clone(&store));
        let publisher = StatusPublisher::new(Arc::clone(&store), Duration::from_secs(5), 60);

        Self {
            store,
            tracker,
            onboarder,
            machine,
            publisher,
            _temp_dir: temp_dir,
        }
    }
}

#[tokio::test]
async fn test_deploy_then_progress_to_live() {
    let harness = TestHarness::new();

    let record = harness
        .onboarder
        .deploy("acme", "we try harder", KEY)
        .await
        .expect("deploy should succeed");
    assert_eq!(record.status, STATUS_CREATED);

    harness.machine.apply("acme", "provisioning").unwrap();
    harness.machine.apply("acme", "live").unwrap();

    let stored = harness.store.find_by_name("acme").unwrap().unwrap();
    assert_eq!(stored.status, "live");
    assert_eq!(stored.motto, "we try harder");

    // Exactly one tracking issue was filed for the deploy
    let issues = harness.tracker.filed_issues().await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "acme");
}

#[tokio::test]
async fn test_create_path_skips_tracker() {
    let harness = TestHarness::new();

    let record = harness
        .onboarder
        .create("globex", "synergy now", KEY)
        .expect("create should succeed");
    assert_eq!(record.status, STATUS_DB_UPDATED);

    assert!(harness.tracker.filed_issues().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_deploy_leaves_lifecycle_intact() {
    let harness = TestHarness::new();

    harness
        .onboarder
        .deploy("acme", "we try harder", KEY)
        .await
        .unwrap();
    harness.machine.apply("acme", "live").unwrap();

    let result = harness.onboarder.deploy("acme", "another motto", KEY).await;
    assert!(matches!(result, Err(OnboardingError::DuplicateName(_))));

    // The existing record and its status survive the rejected attempt
    let stored = harness.store.find_by_name("acme").unwrap().unwrap();
    assert_eq!(stored.motto, "we try harder");
    assert_eq!(stored.status, "live");

    // And no second issue was filed
    assert_eq!(harness.tracker.filed_issues().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stream_observes_lifecycle_transitions() {
    let harness = TestHarness::new();

    let mut stream = Box::pin(harness.publisher.snapshots("acme"));

    // No record yet: the stream reports the provisioning sentinel
    assert_eq!(stream.next().await.unwrap().status, STATUS_INITIALIZING);

    harness
        .onboarder
        .deploy("acme", "we try harder", KEY)
        .await
        .unwrap();
    assert_eq!(stream.next().await.unwrap().status, STATUS_CREATED);

    harness.machine.apply("acme", "live").unwrap();
    assert_eq!(stream.next().await.unwrap().status, "live");
}

#[tokio::test(start_paused = true)]
async fn test_stream_for_never_created_customer_terminates() {
    let harness = TestHarness::new();

    let snapshots: Vec<_> = harness.publisher.snapshots("ghost").collect().await;

    assert_eq!(snapshots.len(), 60);
    assert!(snapshots.iter().all(|s| s.status == STATUS_INITIALIZING));
}

#[tokio::test]
async fn test_records_survive_store_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    {
        let store: Arc<dyn CustomerStore> =
            Arc::new(SqliteCustomerStore::new(&db_path).unwrap());
        let onboarder =
            Onboarder::new(FormKeyGate::new(Some(KEY.to_string())), Arc::clone(&store));
        onboarder.create("acme", "we try harder", KEY).unwrap();
    }

    let reopened = SqliteCustomerStore::new(&db_path).unwrap();
    let record = reopened.find_by_name("acme").unwrap().unwrap();
    assert_eq!(record.motto, "we try harder");
    assert_eq!(record.status, STATUS_DB_UPDATED);
}
