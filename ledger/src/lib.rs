mod client;
mod error;
mod memory;
mod payload;
mod store_ledger;
mod types;

#[cfg(test)]
#[path = "tests/common.rs"]
pub mod common;

pub use crate::client::SubmissionLedger;
pub use crate::error::{LedgerError, LedgerResult};
pub use crate::memory::MemoryLedger;
pub use crate::payload::{
    Ed25519Verifier, SignatureVerifier, SignedSubmission, SubmissionPayload, VerifyError,
};
pub use crate::store_ledger::StoreLedger;
pub use crate::types::{
    AuditTrigger, AuditVote, ContentAddress, ParticipantKey, Round, RoundSubmissionInfo,
    RoundSubmissions, SubmissionRecord,
};
