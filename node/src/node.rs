use config::{Config as _, ConfigError, Parameters, Secret, Task};
use crypto::{CryptoError, PublicKey};
use election::{
    CancellationToken, Election, ElectionError, FixedSlot, RoleResolution, SelectionCache, SlotClock,
};
use ledger::{
    AuditVote, ContentAddress, Ed25519Verifier, LedgerError, ParticipantKey, Round,
    SignedSubmission, StoreLedger, SubmissionPayload,
};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use store::{Store, StoreError};
use thiserror::Error;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
pub mod node_tests;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    LedgerError(#[from] LedgerError),

    #[error(transparent)]
    ElectionError(#[from] ElectionError),

    #[error("Invalid participant key: {0}")]
    InvalidKey(#[from] CryptoError),

    #[error("Either a round or a slot is required")]
    MissingRound,
}

/// A participant's view of one task: its local ledger and the election
/// computed over it.
pub struct Node {
    task: Task,
    ledger: StoreLedger,
    election: Election,
}

impl Node {
    pub fn new(task_file: &str, store_path: &str, parameters: Option<&str>) -> Result<Self, NodeError> {
        let task = Task::read(task_file)?;

        // Load default parameters if none are specified.
        let parameters = match parameters {
            Some(filename) => Parameters::read(filename)?,
            None => Parameters::default(),
        };

        let store = Store::new(store_path)?;
        let ledger = StoreLedger::new(store);
        let cache = match parameters.cache_ttl_ms {
            0 => None,
            ttl => Some(SelectionCache::new(Duration::from_millis(ttl))),
        };
        let election = Election::with_options(
            &task.task_id,
            parameters,
            Arc::new(ledger.clone()),
            Arc::new(Ed25519Verifier),
            CancellationToken::new(),
            cache,
        );
        info!("Node ready for task {}", task.task_id);
        Ok(Self {
            task,
            ledger,
            election,
        })
    }

    pub fn print_key_file(filename: &str) -> Result<(), NodeError> {
        Ok(Secret::new().write(filename)?)
    }

    /// Signs a submission for `round` with the keys in `key_file` and records
    /// it in the ledger.
    pub async fn submit(
        &self,
        key_file: &str,
        round: Round,
        identity: Option<&str>,
    ) -> Result<ContentAddress, NodeError> {
        let secret = Secret::read(key_file)?;
        let key = ParticipantKey::from(&secret.name);
        let mut payload = SubmissionPayload::new(&self.task.task_id, round, key.clone());
        if let Some(identity) = identity {
            payload = payload.with_identity(identity);
        }
        let blob = SignedSubmission::sign(&payload, &secret.secret)?.to_bytes()?;
        let address = self.ledger.record_submission(round, key.clone(), blob).await?;
        info!("Submitted {} for round {} as {}", address, round, key);
        Ok(address)
    }

    /// Records an audit vote by `voter` against the submission of `key`.
    pub async fn flag(&self, round: Round, key: &str, voter: &str, is_valid: bool) -> Result<(), NodeError> {
        let key = ParticipantKey::from(PublicKey::from_base58(key)?);
        let voter = ParticipantKey::from(PublicKey::from_base58(voter)?);
        let vote = AuditVote { voter, is_valid };
        Ok(self.ledger.flag(round, key, vote).await?)
    }

    /// Role of the key in `key_file`, either for `round` or for the round
    /// under way at `slot`.
    pub async fn role(
        &self,
        key_file: &str,
        round: Option<i64>,
        slot: Option<u64>,
    ) -> Result<RoleResolution, NodeError> {
        let caller = ParticipantKey::from(&Secret::read(key_file)?.name);
        let leader_set_size = self.election.parameters().leader_set_size;
        let role = match (round, slot) {
            (Some(round), _) => self.election.resolve_role(round, leader_set_size, &caller).await?,
            (None, Some(slot)) => {
                let clock = SlotClock::new(FixedSlot(slot), &self.task);
                self.election.current_role(&clock, &caller).await?
            }
            (None, None) => return Err(NodeError::MissingRound),
        };
        Ok(role)
    }

    pub async fn sample(&self, round: i64, count: Option<usize>) -> Vec<ParticipantKey> {
        let count = count.unwrap_or(self.election.parameters().sample_size);
        self.election.sample_random_participants(round, count).await
    }

    pub async fn audit(&self, address: &str, round: i64, submitter: &str) -> Result<bool, NodeError> {
        let submitter = ParticipantKey::from(PublicKey::from_base58(submitter)?);
        let address = ContentAddress::new(address);
        Ok(self.election.audit_submission(&address, round, &submitter).await)
    }
}
