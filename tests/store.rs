use eightdigit::{AppError, Backend, RandomNumberStore};
use pretty_assertions::assert_eq;

async fn memory_store() -> RandomNumberStore {
    let store = RandomNumberStore::connect("sqlite::memory:").await.unwrap();
    store.initialize().await.unwrap();
    store
}

async fn values(store: &RandomNumberStore) -> Vec<String> {
    store
        .fetch(None, true)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.value)
        .collect()
}

#[tokio::test]
async fn fetches_newest_first() {
    let store = memory_store().await;
    assert_eq!(store.backend(), Backend::Sqlite);
    let numbers = ["00000001", "12345678", "99999999"];
    for n in numbers {
        store.insert(n).await.unwrap();
    }

    let expected: Vec<String> = numbers.iter().rev().map(|s| s.to_string()).collect();
    assert_eq!(values(&store).await, expected);
}

#[tokio::test]
async fn ids_increase_and_new_rows_are_unviewed() {
    let store = memory_store().await;
    store.insert("00000001").await.unwrap();
    store.insert("00000002").await.unwrap();

    let records = store.fetch(None, true).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].id > records[1].id);
    assert!(records.iter().all(|r| !r.viewed));
    assert!(records[0].created_at >= records[1].created_at);
}

#[tokio::test]
async fn limits_results() {
    let store = memory_store().await;
    for i in 0..5 {
        store.insert(&format!("{:08}", i)).await.unwrap();
    }

    let limited: Vec<String> = store
        .fetch(Some(2), true)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.value)
        .collect();
    assert_eq!(limited, vec!["00000004", "00000003"]);

    assert_eq!(store.fetch(Some(50), true).await.unwrap().len(), 5);
    assert!(store.fetch(Some(0), true).await.unwrap().is_empty());
}

#[tokio::test]
async fn negative_limit_is_rejected() {
    let store = memory_store().await;
    let err = store.fetch(Some(-1), true).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn hides_record_after_marked_viewed() {
    let store = memory_store().await;
    store.insert("11111111").await.unwrap();

    let latest = store.fetch_latest_unseen().await.unwrap().unwrap();
    assert_eq!(latest.value, "11111111");
    assert!(!latest.viewed);

    store.mark_viewed(latest.id).await.unwrap();
    assert_eq!(store.fetch_latest_unseen().await.unwrap(), None);

    // Marking again, or marking an id that never existed, changes nothing.
    store.mark_viewed(latest.id).await.unwrap();
    store.mark_viewed(latest.id + 100).await.unwrap();
    let all = store.fetch(None, true).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].viewed);
}

#[tokio::test]
async fn latest_unseen_skips_viewed_rows() {
    let store = memory_store().await;
    store.insert("00000001").await.unwrap();
    store.insert("00000002").await.unwrap();

    let newest = store.fetch_latest_unseen().await.unwrap().unwrap();
    assert_eq!(newest.value, "00000002");
    store.mark_viewed(newest.id).await.unwrap();

    let next = store.fetch_latest_unseen().await.unwrap().unwrap();
    assert_eq!(next.value, "00000001");

    let unviewed: Vec<String> = store
        .fetch(None, false)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.value)
        .collect();
    assert_eq!(unviewed, vec!["00000001"]);
}

#[tokio::test]
async fn prunes_to_max_records() {
    let store = memory_store().await;
    for i in 0..12 {
        store.insert(&format!("{:08}", i)).await.unwrap();
    }

    let deleted = store.prune_excess(10).await.unwrap();
    assert_eq!(deleted, 2);

    let remaining = values(&store).await;
    let expected: Vec<String> = (2..12).rev().map(|i| format!("{:08}", i)).collect();
    assert_eq!(remaining, expected);
    assert_eq!(remaining.first().map(String::as_str), Some("00000011"));
    assert_eq!(remaining.last().map(String::as_str), Some("00000002"));
}

#[tokio::test]
async fn prune_is_a_noop_within_cap_or_for_non_positive_cap() {
    let store = memory_store().await;
    for i in 0..3 {
        store.insert(&format!("{:08}", i)).await.unwrap();
    }

    assert_eq!(store.prune_excess(3).await.unwrap(), 0);
    assert_eq!(store.prune_excess(10).await.unwrap(), 0);
    assert_eq!(store.prune_excess(0).await.unwrap(), 0);
    assert_eq!(store.prune_excess(-5).await.unwrap(), 0);
    assert_eq!(values(&store).await.len(), 3);
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let store = memory_store().await;
    store.insert("12121212").await.unwrap();
    store.initialize().await.unwrap();
    store.initialize().await.unwrap();
    assert_eq!(values(&store).await, vec!["12121212"]);
}

#[tokio::test]
async fn initialize_adds_viewed_to_legacy_table() {
    let store = RandomNumberStore::connect("sqlite::memory:").await.unwrap();
    sqlx::query(
        r#"
        CREATE TABLE random_numbers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(store.pool())
    .await
    .unwrap();
    sqlx::query("INSERT INTO random_numbers (value) VALUES ('55555555')")
        .execute(store.pool())
        .await
        .unwrap();

    store.initialize().await.unwrap();

    let legacy = store.fetch_latest_unseen().await.unwrap().unwrap();
    assert_eq!(legacy.value, "55555555");
    assert!(!legacy.viewed);
    store.mark_viewed(legacy.id).await.unwrap();
    assert_eq!(store.fetch_latest_unseen().await.unwrap(), None);
}

#[tokio::test]
async fn unsupported_backend_is_a_config_error() {
    let err = RandomNumberStore::connect("postgres://localhost/numbers")
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AppError::Config(_)));
}
