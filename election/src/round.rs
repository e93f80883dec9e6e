use async_trait::async_trait;
use config::Task;

#[cfg(test)]
#[path = "tests/round_tests.rs"]
pub mod round_tests;

/// Where the chain currently is.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn current_slot(&self) -> Option<u64>;
}

/// Tells which round is under way.
#[async_trait]
pub trait RoundSource: Send + Sync {
    async fn current_round(&self) -> Option<i64>;
}

pub struct FixedSlot(pub u64);

#[async_trait]
impl SlotSource for FixedSlot {
    async fn current_slot(&self) -> Option<u64> {
        Some(self.0)
    }
}

pub struct FixedRound(pub i64);

#[async_trait]
impl RoundSource for FixedRound {
    async fn current_round(&self) -> Option<i64> {
        Some(self.0)
    }
}

/// Derives the round from the slot: rounds are `round_time` slots long and
/// round 0 starts at `starting_slot`.
pub struct SlotClock<S> {
    slots: S,
    starting_slot: u64,
    round_time: u64,
}

impl<S: SlotSource> SlotClock<S> {
    pub fn new(slots: S, task: &Task) -> Self {
        Self {
            slots,
            starting_slot: task.starting_slot,
            round_time: task.round_time,
        }
    }

    pub fn round_at(&self, slot: u64) -> Option<i64> {
        if self.round_time == 0 || slot < self.starting_slot {
            return None;
        }
        Some(((slot - self.starting_slot) / self.round_time) as i64)
    }
}

#[async_trait]
impl<S: SlotSource> RoundSource for SlotClock<S> {
    async fn current_round(&self) -> Option<i64> {
        let slot = self.slots.current_slot().await?;
        self.round_at(slot)
    }
}
