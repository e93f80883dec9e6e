use crate::reader::LedgerReader;
use futures::future::join_all;
use ledger::{ParticipantKey, RoundSubmissionInfo};
use log::debug;
use std::collections::{HashMap, HashSet};

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
pub mod aggregator_tests;

/// Who submitted how often over a window of rounds, and who was flagged by an
/// audit in that window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    pub frequency: HashMap<ParticipantKey, u64>,
    pub audit_flagged: HashSet<ParticipantKey>,
}

impl History {
    fn absorb(&mut self, info: &RoundSubmissionInfo) {
        for key in info.submitters() {
            *self.frequency.entry(key.clone()).or_insert(0) += 1;
        }
        self.audit_flagged.extend(info.audit_flagged().cloned());
    }

    /// Keys not flagged by an audit, by descending submission count. Keys
    /// with equal counts are in key order.
    pub fn ranked(&self) -> Vec<(ParticipantKey, u64)> {
        let mut ranked: Vec<_> = self
            .frequency
            .iter()
            .filter(|(key, _)| !self.audit_flagged.contains(*key))
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        ranked.sort_by(|(a, _), (b, _)| a.cmp(b));
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked
    }
}

pub struct FrequencyAggregator {
    reader: LedgerReader,
}

impl FrequencyAggregator {
    pub fn new(reader: LedgerReader) -> Self {
        Self { reader }
    }

    /// Builds the history of the `lookback` rounds preceding `round`. Rounds
    /// that cannot be read are left out.
    pub async fn aggregate(&self, round: i64, lookback: u64) -> History {
        let reads = (1..=lookback)
            .filter_map(|i| round.checked_sub(i as i64))
            .map(|target| self.reader.round_info(target));
        let infos = join_all(reads).await;

        let mut history = History::default();
        for info in infos.iter().flatten() {
            history.absorb(info);
        }
        debug!(
            "History before round {}: {} submitters, {} flagged",
            round,
            history.frequency.len(),
            history.audit_flagged.len()
        );
        history
    }
}
