use futures::future::FutureExt as _;
use futures::select;
use ledger::{
    ContentAddress, LedgerError, ParticipantKey, Round, RoundSubmissionInfo, SignatureVerifier,
    SignedSubmission, SubmissionLedger, SubmissionPayload, VerifyError,
};
use log::{debug, warn};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
pub mod reader_tests;

/// Why a submission blob could not be turned into a trusted payload.
#[derive(Error, Debug)]
pub enum SubmissionFault {
    #[error("blob {0} was not found")]
    BlobMissing(ContentAddress),

    #[error("blob {0} could not be read: {1}")]
    Unavailable(ContentAddress, String),

    #[error("blob {0} does not match its address")]
    BlobCorrupted(ContentAddress),

    #[error("malformed blob: {0}")]
    MalformedBlob(LedgerError),

    #[error("invalid signature: {0}")]
    InvalidSignature(VerifyError),

    #[error("malformed payload: {0}")]
    MalformedPayload(LedgerError),

    #[error("payload belongs to task {0}")]
    TaskMismatch(String),

    #[error("payload was made by {0}")]
    KeyMismatch(ParticipantKey),
}

impl SubmissionFault {
    /// True when the blob could not be read at all, as opposed to being read
    /// and found wanting.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SubmissionFault::Unavailable(..))
    }
}

/// Everything the election reads goes through here. Read failures and
/// cancellation both degrade to "nothing there"; none of them is an error for
/// the caller.
#[derive(Clone)]
pub struct LedgerReader {
    ledger: Arc<dyn SubmissionLedger>,
    verifier: Arc<dyn SignatureVerifier>,
    task_id: String,
    cancel: CancellationToken,
}

impl LedgerReader {
    pub fn new(
        ledger: Arc<dyn SubmissionLedger>,
        verifier: Arc<dyn SignatureVerifier>,
        task_id: &str,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            ledger,
            verifier,
            task_id: task_id.to_string(),
            cancel,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Submission info of `round`, or `None` if the round is negative, the
    /// ledger has nothing, the read failed, or the read was cancelled.
    pub async fn round_info(&self, round: i64) -> Option<RoundSubmissionInfo> {
        if round < 0 || self.cancel.is_cancelled() {
            return None;
        }
        let round = round as Round;
        select! {
            result = self.ledger.round_submission_info(round).fuse() => match result {
                Ok(Some(info)) => Some(info),
                Ok(None) => {
                    debug!("No submission info for round {}", round);
                    None
                }
                Err(e) => {
                    warn!("Skipping round {}: {}", round, e);
                    None
                }
            },
            _ = self.cancel.cancelled().fuse() => {
                debug!("Read of round {} cancelled", round);
                None
            }
        }
    }

    async fn blob(&self, address: &ContentAddress) -> Result<Vec<u8>, SubmissionFault> {
        if self.cancel.is_cancelled() {
            return Err(SubmissionFault::Unavailable(address.clone(), "cancelled".into()));
        }
        select! {
            result = self.ledger.fetch_blob(address).fuse() => match result {
                Ok(Some(bytes)) => Ok(bytes),
                Ok(None) => Err(SubmissionFault::BlobMissing(address.clone())),
                Err(LedgerError::BlobCorrupted(address)) => Err(SubmissionFault::BlobCorrupted(address)),
                Err(e) => Err(SubmissionFault::Unavailable(address.clone(), e.to_string())),
            },
            _ = self.cancel.cancelled().fuse() => {
                Err(SubmissionFault::Unavailable(address.clone(), "cancelled".into()))
            }
        }
    }

    /// Fetches the blob at `address`, checks it was signed by `key`, and
    /// checks the signed payload names this task and `key`.
    pub async fn verified_payload(
        &self,
        address: &ContentAddress,
        key: &ParticipantKey,
    ) -> Result<SubmissionPayload, SubmissionFault> {
        let blob = self.blob(address).await?;
        let signed = SignedSubmission::from_bytes(&blob).map_err(SubmissionFault::MalformedBlob)?;
        let data = self
            .verifier
            .verify(&signed, key)
            .map_err(SubmissionFault::InvalidSignature)?;
        let payload = SubmissionPayload::decode(&data).map_err(SubmissionFault::MalformedPayload)?;
        ensure!(
            payload.task_id == self.task_id,
            SubmissionFault::TaskMismatch(payload.task_id)
        );
        ensure!(
            &payload.staking_key == key,
            SubmissionFault::KeyMismatch(payload.staking_key)
        );
        Ok(payload)
    }
}
