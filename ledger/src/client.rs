use crate::error::LedgerResult;
use crate::types::{ContentAddress, Round, RoundSubmissionInfo};
use async_trait::async_trait;

/// Read access to the per-round submission ledger and to the blobs its
/// records point at. `Ok(None)` means the ledger has nothing for that round or
/// address; `Err` means it could not be asked. Retries and timeouts are the
/// implementation's business.
#[async_trait]
pub trait SubmissionLedger: Send + Sync {
    async fn round_submission_info(&self, round: Round)
        -> LedgerResult<Option<RoundSubmissionInfo>>;

    async fn fetch_blob(&self, address: &ContentAddress) -> LedgerResult<Option<Vec<u8>>>;
}
