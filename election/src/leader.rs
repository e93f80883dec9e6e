use crate::aggregator::History;
use crate::distance::shortest_distance;
use crate::error::ElectionResult;
use crate::shuffle::SeededShuffler;
use ledger::ParticipantKey;
use log::debug;
use std::cmp::min;

#[cfg(test)]
#[path = "tests/leader_tests.rs"]
pub mod leader_tests;

pub struct LeaderSetResolver {
    task_id: String,
}

impl LeaderSetResolver {
    pub fn new(task_id: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
        }
    }

    /// The (at most) `leader_set_size` most frequent eligible submitters.
    /// When more keys tie at the boundary count than there are seats left,
    /// the seats go to a seeded shuffle of the tied keys.
    pub fn candidate_pool(&self, history: &History, leader_set_size: usize) -> Vec<ParticipantKey> {
        let ranked = history.ranked();
        let size = min(leader_set_size, ranked.len());
        if size == 0 {
            return Vec::new();
        }

        let threshold = ranked[size - 1].1;
        let at_threshold = ranked.iter().filter(|(_, count)| *count >= threshold).count();
        if at_threshold <= size {
            return ranked.into_iter().take(size).map(|(key, _)| key).collect();
        }

        let (above, tied): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .partition(|(_, count)| *count > threshold);
        let mut pool: Vec<_> = above.into_iter().map(|(key, _)| key).collect();
        let seats = size - pool.len();
        let tied: Vec<_> = tied.into_iter().map(|(key, _)| key).collect();
        debug!("{} keys tie for {} seats at count {}", tied.len(), seats, threshold);
        pool.extend(SeededShuffler::for_leader_set(&self.task_id).sample(tied, seats));
        pool
    }

    /// The candidate closest to `caller`, if there is any candidate.
    pub fn select_leader(
        &self,
        history: &History,
        leader_set_size: usize,
        caller: &ParticipantKey,
    ) -> ElectionResult<Option<ParticipantKey>> {
        let pool = self.candidate_pool(history, leader_set_size);
        debug!("Leader candidates: {:?}", pool);
        Ok(shortest_distance(&pool, caller)?.cloned())
    }
}
