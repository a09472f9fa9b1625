//! PostgreSQL Storage Integration Tests
//!
//! These tests require a database connection.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored --test-threads=1

use account_api::{NewAccount, PersonName, Storage, StorageError, Transfer};

mod common;

fn new_account(first: &str, last: &str) -> NewAccount {
    NewAccount::new(
        PersonName::parse("firstName", first).unwrap(),
        PersonName::parse("lastName", last).unwrap(),
    )
}

async fn fund(storage: &account_api::PostgresStorage, id: i64, balance: i64) {
    sqlx::query("UPDATE accounts SET balance = $1 WHERE id = $2")
        .bind(balance)
        .bind(id)
        .execute(storage.pool())
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_init_is_idempotent() {
    let storage = common::setup_test_db().await;
    storage.init().await.unwrap();
    storage.init().await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_get_delete() {
    let storage = common::setup_test_db().await;

    let created = storage.create_account(&new_account("Ann", "Lee")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.first_name, "Ann");
    assert_eq!(created.balance, 0);
    assert!((0..1_000_000).contains(&created.number));

    let fetched = storage.get_account_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);

    storage.delete_account(created.id).await.unwrap();
    let err = storage.get_account_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(id) if id == created.id));

    // Deleting again is not an error
    storage.delete_account(created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_accounts() {
    let storage = common::setup_test_db().await;
    assert!(storage.get_accounts().await.unwrap().is_empty());

    let a = storage.create_account(&new_account("Ann", "Lee")).await.unwrap();
    let b = storage.create_account(&new_account("Bob", "Ray")).await.unwrap();

    let accounts = storage.get_accounts().await.unwrap();
    assert!(accounts.contains(&a));
    assert!(accounts.contains(&b));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_transfer_is_atomic() {
    let storage = common::setup_test_db().await;
    let from = storage.create_account(&new_account("Ann", "Lee")).await.unwrap();
    let to = storage.create_account(&new_account("Bob", "Ray")).await.unwrap();
    fund(&storage, from.id, 100).await;

    storage
        .transfer(&Transfer::new(from.id, to.id, 40).unwrap())
        .await
        .unwrap();
    assert_eq!(storage.get_account_by_id(from.id).await.unwrap().balance, 60);
    assert_eq!(storage.get_account_by_id(to.id).await.unwrap().balance, 40);

    let err = storage
        .transfer(&Transfer::new(from.id, to.id, 61).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InsufficientBalance { available: 60, .. }));

    let err = storage
        .transfer(&Transfer::new(from.id, i64::MAX, 1).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(i64::MAX)));

    assert_eq!(storage.get_account_by_id(from.id).await.unwrap().balance, 60);
    assert_eq!(storage.get_account_by_id(to.id).await.unwrap().balance, 40);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_transfers_preserve_total() {
    let storage = common::setup_test_db().await;
    let a = storage.create_account(&new_account("Ann", "Lee")).await.unwrap();
    let b = storage.create_account(&new_account("Bob", "Ray")).await.unwrap();
    fund(&storage, a.id, 500).await;
    fund(&storage, b.id, 500).await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let storage = storage.clone();
        let (from, to) = if i % 2 == 0 { (a.id, b.id) } else { (b.id, a.id) };
        tasks.push(tokio::spawn(async move {
            storage
                .transfer(&Transfer::new(from, to, 13).unwrap())
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let total = storage.get_account_by_id(a.id).await.unwrap().balance
        + storage.get_account_by_id(b.id).await.unwrap().balance;
    assert_eq!(total, 1000);
}
