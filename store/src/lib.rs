use log::error;
use thiserror::Error;
use tokio::sync::mpsc::{channel, Sender};
use tokio::sync::oneshot;

#[cfg(test)]
#[path = "tests/store_tests.rs"]
pub mod store_tests;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rocksdb::Error),

    #[error("Update of key rejected: {0}")]
    UpdateRejected(String),

    #[error("Store is not running")]
    ChannelClosed,
}

pub type StoreResult<T> = Result<T, StoreError>;

type Key = Vec<u8>;
type Value = Vec<u8>;

/// Computes the new value of a key from its current value. An `Err` leaves
/// the stored value untouched.
pub type Updater = Box<dyn FnOnce(Option<Value>) -> Result<Value, String> + Send>;

pub enum StoreCommand {
    Write(Key, Value, oneshot::Sender<StoreResult<()>>),
    Read(Key, oneshot::Sender<StoreResult<Option<Value>>>),
    Update(Key, Updater, oneshot::Sender<StoreResult<Value>>),
}

/// Handle to a RocksDB instance owned by a single task. Commands are applied
/// in the order they are received, so an `update` is atomic with respect to
/// every other command.
#[derive(Clone)]
pub struct Store {
    channel: Sender<StoreCommand>,
}

impl Store {
    pub fn new(path: &str) -> StoreResult<Self> {
        let db = rocksdb::DB::open_default(path)?;
        let (tx, mut rx) = channel(100);
        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    StoreCommand::Write(key, value, sender) => {
                        let response = db.put(&key, &value).map_err(StoreError::from);
                        if sender.send(response).is_err() {
                            error!("Failed to reply to store command: Receiver dropped");
                        }
                    }
                    StoreCommand::Read(key, sender) => {
                        let response = db.get(&key).map_err(StoreError::from);
                        if sender.send(response).is_err() {
                            error!("Failed to reply to store command: Receiver dropped");
                        }
                    }
                    StoreCommand::Update(key, updater, sender) => {
                        let response = db.get(&key).map_err(StoreError::from).and_then(|old| {
                            let new = updater(old).map_err(StoreError::UpdateRejected)?;
                            db.put(&key, &new)?;
                            Ok(new)
                        });
                        if sender.send(response).is_err() {
                            error!("Failed to reply to store command: Receiver dropped");
                        }
                    }
                }
            }
        });
        Ok(Self { channel: tx })
    }

    async fn request<T>(
        &self,
        command: StoreCommand,
        receiver: oneshot::Receiver<StoreResult<T>>,
    ) -> StoreResult<T> {
        self.channel
            .send(command)
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        receiver.await.map_err(|_| StoreError::ChannelClosed)?
    }

    pub async fn write(&self, key: Key, value: Value) -> StoreResult<()> {
        let (sender, receiver) = oneshot::channel();
        self.request(StoreCommand::Write(key, value, sender), receiver)
            .await
    }

    pub async fn read(&self, key: Key) -> StoreResult<Option<Value>> {
        let (sender, receiver) = oneshot::channel();
        self.request(StoreCommand::Read(key, sender), receiver).await
    }

    pub async fn update(&self, key: Key, updater: Updater) -> StoreResult<Value> {
        let (sender, receiver) = oneshot::channel();
        self.request(StoreCommand::Update(key, updater, sender), receiver)
            .await
    }
}
