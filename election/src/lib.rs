#[macro_use]
mod error;
mod aggregator;
mod audit;
mod cache;
mod distance;
mod election;
mod identity;
mod leader;
mod reader;
mod round;
mod sampler;
mod shuffle;

#[cfg(test)]
#[path = "tests/common.rs"]
mod common;

pub use crate::aggregator::{FrequencyAggregator, History};
pub use crate::audit::Auditor;
pub use crate::cache::{SelectionCache, SelectionKey};
pub use crate::distance::{distance, shortest_distance};
pub use crate::election::{Election, LeaderSelection, RoleResolution};
pub use crate::error::{ElectionError, ElectionResult};
pub use crate::identity::{IdentityMiss, IdentityResolver};
pub use crate::leader::LeaderSetResolver;
pub use crate::reader::{LedgerReader, SubmissionFault};
pub use crate::round::{FixedRound, FixedSlot, RoundSource, SlotClock, SlotSource};
pub use crate::sampler::RandomNodeSampler;
pub use crate::shuffle::SeededShuffler;
pub use tokio_util::sync::CancellationToken;
