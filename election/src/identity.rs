use crate::reader::{LedgerReader, SubmissionFault};
use ledger::ParticipantKey;
use log::debug;
use thiserror::Error;

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
pub mod identity_tests;

/// Why a round did not yield an identity for a key.
#[derive(Error, Debug)]
pub enum IdentityMiss {
    #[error("no submission info")]
    NoRoundInfo,

    #[error("no submission from the key")]
    NoSubmission,

    #[error(transparent)]
    Fault(#[from] SubmissionFault),

    #[error("payload carries no identity")]
    MissingIdentity,
}

/// Finds the reportable identity a key signed into one of its recent
/// submissions.
pub struct IdentityResolver {
    reader: LedgerReader,
    lookback: u64,
}

impl IdentityResolver {
    pub fn new(reader: LedgerReader, lookback: u64) -> Self {
        Self { reader, lookback }
    }

    /// Walks back from `round - 1` for at most `lookback` rounds and returns
    /// the first identity found. A round that yields nothing is skipped.
    pub async fn resolve(&self, round: i64, key: &ParticipantKey) -> Option<String> {
        for i in 1..=self.lookback {
            let target = match round.checked_sub(i as i64) {
                Some(target) if target >= 0 => target,
                _ => break,
            };
            match self.identity_at(target, key).await {
                Ok(identity) => {
                    debug!("Identity of {} found in round {}", key, target);
                    return Some(identity);
                }
                Err(miss) => debug!("No identity of {} in round {}: {}", key, target, miss),
            }
        }
        None
    }

    pub async fn identity_at(&self, round: i64, key: &ParticipantKey) -> Result<String, IdentityMiss> {
        let info = self
            .reader
            .round_info(round)
            .await
            .ok_or(IdentityMiss::NoRoundInfo)?;
        let record = info
            .latest_submissions()
            .and_then(|submissions| submissions.get(key))
            .ok_or(IdentityMiss::NoSubmission)?;
        let payload = self
            .reader
            .verified_payload(&record.submission_value, key)
            .await?;
        payload
            .identity
            .filter(|identity| !identity.is_empty())
            .ok_or(IdentityMiss::MissingIdentity)
    }
}
