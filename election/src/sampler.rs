use crate::reader::LedgerReader;
use crate::shuffle::SeededShuffler;
use ledger::ParticipantKey;
use log::debug;

#[cfg(test)]
#[path = "tests/sampler_tests.rs"]
pub mod sampler_tests;

/// Draws participants of the previous round for audit duty.
pub struct RandomNodeSampler {
    reader: LedgerReader,
}

impl RandomNodeSampler {
    pub fn new(reader: LedgerReader) -> Self {
        Self { reader }
    }

    /// Up to `n` distinct submitters of `round - 1`, drawn with a seed of the
    /// task and `round`. Everyone is returned when there are at most `n`.
    pub async fn sample(&self, round: i64, n: usize) -> Vec<ParticipantKey> {
        let previous = match round.checked_sub(1) {
            Some(previous) => previous,
            None => return Vec::new(),
        };
        let info = match self.reader.round_info(previous).await {
            Some(info) => info,
            None => return Vec::new(),
        };
        let available: Vec<_> = info
            .latest_submissions()
            .map(|submissions| submissions.keys().cloned().collect())
            .unwrap_or_default();
        debug!("{} participants available for sampling in round {}", available.len(), round);
        if available.len() <= n {
            return available;
        }
        SeededShuffler::for_sampling(self.reader.task_id(), round).sample(available, n)
    }
}
