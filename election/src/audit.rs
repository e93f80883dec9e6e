use crate::reader::LedgerReader;
use config::AuditPolicy;
use ledger::{ContentAddress, ParticipantKey};
use log::{info, warn};

#[cfg(test)]
#[path = "tests/audit_tests.rs"]
pub mod audit_tests;

/// Judges one participant's submission for a round.
pub struct Auditor {
    reader: LedgerReader,
    policy: AuditPolicy,
}

impl Auditor {
    pub fn new(reader: LedgerReader, policy: AuditPolicy) -> Self {
        Self { reader, policy }
    }

    /// A submission passes when its blob is signed by `submitter` and names
    /// this task, `submitter` and `round`. A blob that cannot be read is
    /// judged by the policy.
    pub async fn audit(&self, address: &ContentAddress, round: i64, submitter: &ParticipantKey) -> bool {
        match self.reader.verified_payload(address, submitter).await {
            Ok(payload) if payload.round_number as i64 == round => {
                info!("Submission of {} for round {} is valid", submitter, round);
                true
            }
            Ok(payload) => {
                warn!(
                    "Submission of {} is for round {}, expected {}",
                    submitter, payload.round_number, round
                );
                false
            }
            Err(fault) if fault.is_unavailable() => {
                warn!(
                    "Cannot audit {} for round {} ({}), applying {:?}",
                    submitter, round, fault, self.policy
                );
                self.policy == AuditPolicy::FailOpen
            }
            Err(fault) => {
                warn!("Submission of {} for round {} rejected: {}", submitter, round, fault);
                false
            }
        }
    }
}
