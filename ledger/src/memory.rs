use crate::client::SubmissionLedger;
use crate::error::{LedgerError, LedgerResult};
use crate::types::{
    AuditVote, ContentAddress, ParticipantKey, Round, RoundSubmissionInfo, SubmissionRecord,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
pub mod memory_tests;

#[derive(Default)]
struct State {
    rounds: HashMap<Round, RoundSubmissionInfo>,
    blobs: HashMap<ContentAddress, Vec<u8>>,
    unavailable_rounds: HashSet<Round>,
    unavailable_blobs: HashSet<ContentAddress>,
}

/// A ledger held in memory. Rounds and blobs can be marked unavailable to
/// reproduce a flaky backend.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<RwLock<State>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn write<F: FnOnce(&mut State)>(&self, f: F) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn read<T, F: FnOnce(&State) -> T>(&self, f: F) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    pub fn add_blob(&self, bytes: Vec<u8>) -> ContentAddress {
        let address = ContentAddress::of(&bytes);
        let copy = address.clone();
        self.write(|state| {
            state.blobs.insert(copy, bytes);
        });
        address
    }

    pub fn add_record(&self, round: Round, key: ParticipantKey, record: SubmissionRecord) {
        self.write(|state| {
            state
                .rounds
                .entry(round)
                .or_insert_with(RoundSubmissionInfo::default)
                .insert_submission(round, key, record)
        });
    }

    /// Stores `blob` and records it as `key`'s submission for `round`.
    pub fn add_submission(&self, round: Round, key: ParticipantKey, blob: Vec<u8>) -> ContentAddress {
        let address = self.add_blob(blob);
        let record = SubmissionRecord {
            submission_value: address.clone(),
        };
        self.add_record(round, key, record);
        address
    }

    pub fn flag(&self, round: Round, key: ParticipantKey, vote: AuditVote) {
        self.write(|state| {
            state
                .rounds
                .entry(round)
                .or_insert_with(RoundSubmissionInfo::default)
                .insert_audit_vote(round, key, vote)
        });
    }

    pub fn set_round_unavailable(&self, round: Round) {
        self.write(|state| {
            state.unavailable_rounds.insert(round);
        });
    }

    /// Replaces the bytes stored under `address`.
    pub fn tamper_blob(&self, address: &ContentAddress, bytes: Vec<u8>) {
        let address = address.clone();
        self.write(|state| {
            state.blobs.insert(address, bytes);
        });
    }

    pub fn set_blob_unavailable(&self, address: ContentAddress) {
        self.write(|state| {
            state.unavailable_blobs.insert(address);
        });
    }
}

#[async_trait]
impl SubmissionLedger for MemoryLedger {
    async fn round_submission_info(
        &self,
        round: Round,
    ) -> LedgerResult<Option<RoundSubmissionInfo>> {
        self.read(|state| {
            if state.unavailable_rounds.contains(&round) {
                return Err(LedgerError::RoundUnavailable(round));
            }
            Ok(state.rounds.get(&round).cloned())
        })
    }

    async fn fetch_blob(&self, address: &ContentAddress) -> LedgerResult<Option<Vec<u8>>> {
        self.read(|state| {
            if state.unavailable_blobs.contains(address) {
                return Err(LedgerError::BlobUnavailable(address.clone()));
            }
            match state.blobs.get(address) {
                Some(bytes) if !address.matches(bytes) => {
                    Err(LedgerError::BlobCorrupted(address.clone()))
                }
                bytes => Ok(bytes.cloned()),
            }
        })
    }
}
