use super::*;
use std::fs;

#[tokio::test]
async fn create_store() {
    // Create new store.
    let path = ".db_test_create_store";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path);
    assert!(store.is_ok());
}

#[tokio::test]
async fn read_write_value() {
    // Create new store.
    let path = ".db_test_read_write_value";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path).unwrap();

    // Write value to the store.
    let key = vec![0u8, 1u8, 2u8, 3u8];
    let value = vec![4u8, 5u8, 6u8, 7u8];
    assert!(store.write(key.clone(), value.clone()).await.is_ok());

    // Read value.
    let result = store.read(key).await;
    assert!(result.is_ok());
    let read_value = result.unwrap();
    assert!(read_value.is_some());
    assert_eq!(read_value.unwrap(), value);
}

#[tokio::test]
async fn read_unknown_key() {
    // Create new store.
    let path = ".db_test_read_unknown_key";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path).unwrap();

    // Try to read unknown key.
    let key = vec![0u8, 1u8, 2u8, 3u8];
    let result = store.read(key).await;
    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn update_appends_to_existing_value() {
    let path = ".db_test_update_appends";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path).unwrap();
    let key = vec![9u8];

    // Concurrent updates are serialized by the store task.
    let handles: Vec<_> = (0..10u8)
        .map(|i| {
            let store = store.clone();
            let key = key.clone();
            tokio::spawn(async move {
                store
                    .update(
                        key,
                        Box::new(move |old| {
                            let mut value = old.unwrap_or_default();
                            value.push(i);
                            Ok(value)
                        }),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let mut value = store.read(key).await.unwrap().unwrap();
    value.sort_unstable();
    assert_eq!(value, (0..10u8).collect::<Vec<_>>());
}

#[tokio::test]
async fn rejected_update_keeps_value() {
    let path = ".db_test_rejected_update";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path).unwrap();
    let key = vec![1u8];
    store.write(key.clone(), vec![42u8]).await.unwrap();

    let result = store
        .update(key.clone(), Box::new(|_| Err("corrupted".to_string())))
        .await;
    match result {
        Err(StoreError::UpdateRejected(reason)) => assert_eq!(reason, "corrupted"),
        _ => assert!(false),
    }
    assert_eq!(store.read(key).await.unwrap(), Some(vec![42u8]));
}

#[tokio::test]
async fn dropped_receiver_keeps_store_running() {
    let path = ".db_test_dropped_receiver";
    let _ = fs::remove_dir_all(path);
    let store = Store::new(path).unwrap();
    let key = vec![3u8];

    // Nobody waits for this reply.
    let (sender, receiver) = oneshot::channel();
    drop(receiver);
    let command = StoreCommand::Write(key.clone(), vec![8u8], sender);
    assert!(store.channel.send(command).await.is_ok());

    assert_eq!(store.read(key).await.unwrap(), Some(vec![8u8]));
}
