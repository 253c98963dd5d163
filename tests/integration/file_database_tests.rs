//! File-backed database: schema bootstrap is idempotent and data persists.

use std::sync::Arc;

use company_communicator::persistence::db;
use company_communicator::persistence::notification_repo::NotificationRepo;

use super::test_helpers::{draft, march};

#[tokio::test]
async fn records_survive_reconnect() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("communicator.db");
    let path = path.to_str().expect("utf-8 path").to_owned();

    let record = draft("Persisted", march(1, 8));
    {
        let pool = db::connect(&path).await.expect("first connect");
        let repo = NotificationRepo::new(Arc::new(pool.clone()));
        repo.create(&record).await.expect("create");
        pool.close().await;
    }

    let pool = db::connect(&path).await.expect("second connect");
    let repo = NotificationRepo::new(Arc::new(pool));
    let fetched = repo.get_required(&record.id).await.expect("fetch");
    assert_eq!(fetched.title, "Persisted");
}
