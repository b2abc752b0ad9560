//! Tests for the slot store.

use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_file_set_and_get() {
    let tmp = TempDir::new().unwrap();
    let store = KvStore::file(tmp.path().join("test.redb")).unwrap();

    store.set("key1", b"value1").await.unwrap();
    assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
}

#[tokio::test]
async fn test_file_get_nonexistent_key() {
    let tmp = TempDir::new().unwrap();
    let store = KvStore::file(tmp.path().join("test.redb")).unwrap();

    assert!(store.get("nonexistent").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_overwrite() {
    let tmp = TempDir::new().unwrap();
    let store = KvStore::file(tmp.path().join("test.redb")).unwrap();

    store.set_str("portfolio_password", "one").await.unwrap();
    store.set_str("portfolio_password", "two").await.unwrap();
    assert_eq!(
        store.get_str("portfolio_password").await.unwrap().as_deref(),
        Some("two")
    );
}

#[tokio::test]
async fn test_second_open_of_same_file_fails() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("content.redb");

    let _first = KvStore::file(&db_path).unwrap();
    assert!(KvStore::file(&db_path).is_err());
}

#[tokio::test]
async fn test_file_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("nested").join("content.redb");

    {
        let store = KvStore::file(&db_path).unwrap();
        store.set_str("portfolio_bio", "persisted").await.unwrap();
    }

    let store = KvStore::file(&db_path).unwrap();
    assert_eq!(
        store.get_str("portfolio_bio").await.unwrap().as_deref(),
        Some("persisted")
    );
}

#[tokio::test]
async fn test_get_str_rejects_invalid_utf8() {
    let store = KvStore::memory();
    store.set("binary", &[0xff, 0xfe, 0xfd]).await.unwrap();

    let err = store.get_str("binary").await.unwrap_err();
    assert!(err.to_string().contains("not valid UTF-8"));
}

#[tokio::test]
async fn test_custom_backend() {
    let store = KvStore::custom(MemoryBackend::new());
    store.set_str("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
}

#[tokio::test]
async fn test_clones_share_backend() {
    let store = KvStore::memory();
    let clone = store.clone();

    store.set_str("shared", "yes").await.unwrap();
    assert_eq!(clone.get_str("shared").await.unwrap().as_deref(), Some("yes"));
}
