//! Unit tests for `NotificationRepo` persistence and lifecycle guards.

use std::sync::Arc;

use company_communicator::models::notification::{DeliveryCounters, NotificationRecord, Repeats};
use company_communicator::persistence::notification_repo::NotificationRepo;
use company_communicator::persistence::db;
use company_communicator::persistence::source::RecordSource;
use company_communicator::AppError;

async fn repo() -> NotificationRepo {
    let db = db::connect_memory().await.expect("db");
    NotificationRepo::new(Arc::new(db))
}

fn sample(title: &str) -> NotificationRecord {
    NotificationRecord::new_draft(title.to_owned(), "admin@contoso.com".to_owned())
}

// ── Create / fetch ───────────────────────────────────

#[tokio::test]
async fn create_and_fetch_preserves_fields() {
    let repo = repo().await;
    let mut record = sample("Quarterly results");
    record.summary = Some("Numbers are in".into());
    record.teams = vec!["Sales".into(), "Finance".into()];
    record.ad_groups = vec!["Managers".into()];
    record.is_recurrence = true;
    record.repeats = Some(Repeats::Other("Fortnightly".into()));
    record.repeat_start_date = Some(record.created_date);

    repo.create(&record).await.expect("create");
    let fetched = repo.get_by_id(&record.id).await.expect("get").expect("exists");

    assert_eq!(fetched.teams, vec!["Sales".to_owned(), "Finance".to_owned()]);
    assert_eq!(fetched.ad_groups, vec!["Managers".to_owned()]);
    assert!(fetched.rosters.is_empty());
    assert_eq!(fetched.summary.as_deref(), Some("Numbers are in"));
    assert_eq!(fetched.repeats, Some(Repeats::Other("Fortnightly".into())));
    assert_eq!(fetched.created_date, record.created_date);
}

#[tokio::test]
async fn missing_record_is_none_or_not_found() {
    let repo = repo().await;
    assert!(repo.get_by_id("absent").await.expect("get").is_none());
    assert!(matches!(
        repo.get_required("absent").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn record_source_fetches_through_repo() {
    let repo = repo().await;
    let record = sample("Via source");
    repo.create(&record).await.expect("create");

    let source: &dyn RecordSource = &repo;
    let fetched = source.fetch_record(&record.id).await.expect("fetch");
    assert_eq!(fetched.title, "Via source");
    assert!(matches!(
        source.fetch_record("absent").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn duplicate_id_rejected() {
    let repo = repo().await;
    let record = sample("Once");
    repo.create(&record).await.expect("create");
    assert!(matches!(repo.create(&record).await, Err(AppError::Db(_))));
}

// ── Draft editing ────────────────────────────────────

#[tokio::test]
async fn update_draft_replaces_content_and_audience() {
    let repo = repo().await;
    let mut record = sample("Before");
    repo.create(&record).await.expect("create");

    record.title = "After".into();
    record.rosters = vec!["Engineering".into()];
    let updated = repo.update_draft(&record).await.expect("update");

    assert_eq!(updated.title, "After");
    assert_eq!(updated.rosters, vec!["Engineering".to_owned()]);
}

#[tokio::test]
async fn update_draft_rejected_after_dispatch() {
    let repo = repo().await;
    let record = sample("Locked");
    repo.create(&record).await.expect("create");
    repo.mark_sending_started(&record.id, 3).await.expect("dispatch");

    assert!(matches!(
        repo.update_draft(&record).await,
        Err(AppError::InvalidTransition(_))
    ));
}

// ── Dispatch lifecycle ───────────────────────────────

#[tokio::test]
async fn mark_sending_started_clears_draft_flag() {
    let repo = repo().await;
    let record = sample("Go");
    repo.create(&record).await.expect("create");

    let started = repo.mark_sending_started(&record.id, 42).await.expect("dispatch");
    assert!(!started.is_draft);
    assert!(started.sending_started_date.is_some());
    assert_eq!(started.total_message_count, 42);
    assert_eq!(started.sent_date, None);
}

#[tokio::test]
async fn dispatch_twice_is_invalid_transition() {
    let repo = repo().await;
    let record = sample("Twice");
    repo.create(&record).await.expect("create");
    repo.mark_sending_started(&record.id, 1).await.expect("first");

    assert!(matches!(
        repo.mark_sending_started(&record.id, 1).await,
        Err(AppError::InvalidTransition(_))
    ));
}

#[tokio::test]
async fn dispatch_missing_record_is_not_found() {
    let repo = repo().await;
    assert!(matches!(
        repo.mark_sending_started("absent", 1).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn counters_never_decrease() {
    let repo = repo().await;
    let record = sample("Counting");
    repo.create(&record).await.expect("create");
    repo.mark_sending_started(&record.id, 10).await.expect("dispatch");

    let high = DeliveryCounters {
        succeeded: 7,
        failed: 2,
        throttled: 1,
        message_acknowledged: 4,
    };
    repo.update_counters(&record.id, high).await.expect("first update");

    let stale = DeliveryCounters {
        succeeded: 5,
        failed: 3,
        throttled: 0,
        message_acknowledged: 4,
    };
    let updated = repo.update_counters(&record.id, stale).await.expect("second update");

    assert_eq!(updated.succeeded, 7);
    assert_eq!(updated.failed, 3);
    assert_eq!(updated.throttled, 1);
    assert_eq!(updated.message_acknowledged, 4);
}

#[tokio::test]
async fn counters_rejected_for_draft() {
    let repo = repo().await;
    let record = sample("Not yet");
    repo.create(&record).await.expect("create");

    assert!(matches!(
        repo.update_counters(&record.id, DeliveryCounters::default()).await,
        Err(AppError::InvalidTransition(_))
    ));
}

#[tokio::test]
async fn mark_completed_stamps_sent_date_once() {
    let repo = repo().await;
    let record = sample("Done");
    repo.create(&record).await.expect("create");
    repo.mark_sending_started(&record.id, 1).await.expect("dispatch");
    let delivered = DeliveryCounters {
        succeeded: 1,
        ..DeliveryCounters::default()
    };
    repo.update_counters(&record.id, delivered).await.expect("counters");

    let first = repo.mark_completed(&record.id).await.expect("complete");
    assert!(first.is_completed);
    let sent = first.sent_date.expect("sent date");
    assert!(sent >= first.sending_started_date.expect("started"));

    let second = repo.mark_completed(&record.id).await.expect("complete again");
    assert_eq!(second.sent_date, Some(sent));
}

#[tokio::test]
async fn mark_completed_rejected_for_draft() {
    let repo = repo().await;
    let record = sample("Draft");
    repo.create(&record).await.expect("create");

    assert!(matches!(
        repo.mark_completed(&record.id).await,
        Err(AppError::InvalidTransition(_))
    ));
}

// ── Delete ───────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
    let repo = repo().await;
    let record = sample("Bye");
    repo.create(&record).await.expect("create");

    repo.delete(&record.id).await.expect("delete");
    assert!(repo.get_by_id(&record.id).await.expect("get").is_none());
    assert!(matches!(
        repo.delete(&record.id).await,
        Err(AppError::NotFound(_))
    ));
}
