use crate::client::SubmissionLedger;
use crate::error::{LedgerError, LedgerResult};
use crate::types::{
    AuditVote, ContentAddress, ParticipantKey, Round, RoundSubmissionInfo, SubmissionRecord,
};
use async_trait::async_trait;
use log::{debug, warn};
use store::Store;

#[cfg(test)]
#[path = "tests/store_ledger_tests.rs"]
pub mod store_ledger_tests;

const ROUND_PREFIX: &[u8] = b"round/";
const BLOB_PREFIX: &[u8] = b"blob/";

fn round_key(round: Round) -> Vec<u8> {
    [ROUND_PREFIX, &round.to_be_bytes()[..]].concat()
}

fn blob_key(address: &ContentAddress) -> Vec<u8> {
    [BLOB_PREFIX, address.as_str().as_bytes()].concat()
}

/// A ledger persisted in the local store: round infos are bincode-encoded
/// under their round number, blobs under their content address.
#[derive(Clone)]
pub struct StoreLedger {
    store: Store,
}

impl StoreLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn store_blob(&self, bytes: Vec<u8>) -> LedgerResult<ContentAddress> {
        let address = ContentAddress::of(&bytes);
        self.store.write(blob_key(&address), bytes).await?;
        Ok(address)
    }

    async fn update_round<F>(&self, round: Round, f: F) -> LedgerResult<()>
    where
        F: FnOnce(&mut RoundSubmissionInfo) + Send + 'static,
    {
        let updater = Box::new(move |old: Option<Vec<u8>>| {
            let mut info: RoundSubmissionInfo = match old {
                Some(bytes) => bincode::deserialize(&bytes).map_err(|e| e.to_string())?,
                None => RoundSubmissionInfo::default(),
            };
            f(&mut info);
            bincode::serialize(&info).map_err(|e| e.to_string())
        });
        self.store.update(round_key(round), updater).await?;
        Ok(())
    }

    /// Stores `blob` and records it as `key`'s submission for `round`.
    pub async fn record_submission(
        &self,
        round: Round,
        key: ParticipantKey,
        blob: Vec<u8>,
    ) -> LedgerResult<ContentAddress> {
        let address = self.store_blob(blob).await?;
        let record = SubmissionRecord {
            submission_value: address.clone(),
        };
        debug!("Recording submission {} of {} for round {}", address, key, round);
        self.update_round(round, move |info| info.insert_submission(round, key, record))
            .await?;
        Ok(address)
    }

    /// Adds an audit vote against `key`'s submission for `round`.
    pub async fn flag(&self, round: Round, key: ParticipantKey, vote: AuditVote) -> LedgerResult<()> {
        debug!("Recording audit vote against {} for round {}", key, round);
        self.update_round(round, move |info| info.insert_audit_vote(round, key, vote))
            .await
    }
}

#[async_trait]
impl SubmissionLedger for StoreLedger {
    async fn round_submission_info(
        &self,
        round: Round,
    ) -> LedgerResult<Option<RoundSubmissionInfo>> {
        match self.store.read(round_key(round)).await? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn fetch_blob(&self, address: &ContentAddress) -> LedgerResult<Option<Vec<u8>>> {
        match self.store.read(blob_key(address)).await? {
            Some(bytes) if address.matches(&bytes) => Ok(Some(bytes)),
            Some(_) => {
                warn!("Stored blob does not match its address {}", address);
                Err(LedgerError::BlobCorrupted(address.clone()))
            }
            None => Ok(None),
        }
    }
}
