use crate::aggregator::FrequencyAggregator;
use crate::audit::Auditor;
use crate::cache::{SelectionCache, SelectionKey};
use crate::error::{ElectionError, ElectionResult};
use crate::identity::IdentityResolver;
use crate::leader::LeaderSetResolver;
use crate::reader::LedgerReader;
use crate::round::RoundSource;
use crate::sampler::RandomNodeSampler;
use config::Parameters;
use ledger::{ContentAddress, ParticipantKey, SignatureVerifier, SubmissionLedger};
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "tests/election_tests.rs"]
pub mod election_tests;

/// Outcome of electing the leader of one round, as seen by one caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeaderSelection {
    pub chosen_key: Option<ParticipantKey>,
    pub leader_node: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleResolution {
    pub is_leader: bool,
    /// Identity the caller should report: its predecessor's when it leads,
    /// the current leader's otherwise.
    pub leader_node: Option<String>,
}

pub struct Election {
    task_id: String,
    parameters: Parameters,
    reader: LedgerReader,
    aggregator: FrequencyAggregator,
    leaders: LeaderSetResolver,
    identities: IdentityResolver,
    sampler: RandomNodeSampler,
    auditor: Auditor,
    cache: Option<SelectionCache>,
}

impl Election {
    pub fn new(
        task_id: &str,
        parameters: Parameters,
        ledger: Arc<dyn SubmissionLedger>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        Self::with_options(task_id, parameters, ledger, verifier, CancellationToken::new(), None)
    }

    /// Like `new`, but every ledger read is abandoned once `cancel` fires, and
    /// leader selections are memoized in `cache` when one is given. A cached
    /// selection does not see submissions appended after it was computed.
    pub fn with_options(
        task_id: &str,
        parameters: Parameters,
        ledger: Arc<dyn SubmissionLedger>,
        verifier: Arc<dyn SignatureVerifier>,
        cancel: CancellationToken,
        cache: Option<SelectionCache>,
    ) -> Self {
        let reader = LedgerReader::new(ledger, verifier, task_id, cancel);
        Self {
            task_id: task_id.to_string(),
            aggregator: FrequencyAggregator::new(reader.clone()),
            leaders: LeaderSetResolver::new(task_id),
            identities: IdentityResolver::new(reader.clone(), parameters.identity_lookback),
            sampler: RandomNodeSampler::new(reader.clone()),
            auditor: Auditor::new(reader.clone(), parameters.audit_policy),
            cache,
            reader,
            parameters,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Elects the leader of `round` from the submissions of the rounds before
    /// it, and looks up that leader's reportable identity.
    pub async fn leader_for_round(
        &self,
        round: i64,
        leader_set_size: usize,
        caller: &ParticipantKey,
    ) -> ElectionResult<LeaderSelection> {
        if round <= 0 {
            debug!("Round {} has no leader", round);
            return Ok(LeaderSelection::default());
        }

        let key = SelectionKey {
            task_id: self.task_id.clone(),
            round,
            leader_set_size,
            caller: caller.clone(),
        };
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key, Instant::now())) {
            debug!("Leader of round {} served from cache", round);
            return Ok(cached);
        }

        let history = self
            .aggregator
            .aggregate(round, self.parameters.frequency_lookback)
            .await;
        let chosen_key = self.leaders.select_leader(&history, leader_set_size, caller)?;
        let leader_node = match &chosen_key {
            Some(chosen) => self.identities.resolve(round, chosen).await,
            None => None,
        };
        let selection = LeaderSelection {
            chosen_key,
            leader_node,
        };

        // A cancelled computation saw a partial ledger.
        if !self.reader.is_cancelled() {
            if let Some(cache) = &self.cache {
                cache.insert(key, selection.clone(), Instant::now());
            }
        }
        Ok(selection)
    }

    /// Tells `caller` whether it leads `round`. A leader reports the leader
    /// of `previous_leader_offset` rounds earlier.
    pub async fn resolve_role(
        &self,
        round: i64,
        leader_set_size: usize,
        caller: &ParticipantKey,
    ) -> ElectionResult<RoleResolution> {
        let current = self.leader_for_round(round, leader_set_size, caller).await?;
        if current.chosen_key.as_ref() != Some(caller) {
            return Ok(RoleResolution {
                is_leader: false,
                leader_node: current.leader_node,
            });
        }

        let previous_round = match round.checked_sub(self.parameters.previous_leader_offset) {
            Some(previous_round) => previous_round,
            None => {
                return Ok(RoleResolution {
                    is_leader: true,
                    leader_node: None,
                })
            }
        };
        info!("{} leads round {}, reporting the leader of round {}", caller, round, previous_round);
        let previous = self
            .leader_for_round(previous_round, leader_set_size, caller)
            .await?;
        Ok(RoleResolution {
            is_leader: true,
            leader_node: previous.leader_node,
        })
    }

    /// Resolves the role of `caller` in the round `rounds` reports as current.
    pub async fn current_role(
        &self,
        rounds: &dyn RoundSource,
        caller: &ParticipantKey,
    ) -> ElectionResult<RoleResolution> {
        let round = rounds.current_round().await.ok_or(ElectionError::UnknownRound)?;
        self.resolve_role(round, self.parameters.leader_set_size, caller)
            .await
    }

    pub async fn sample_random_participants(&self, round: i64, n: usize) -> Vec<ParticipantKey> {
        self.sampler.sample(round, n).await
    }

    pub async fn audit_submission(
        &self,
        address: &ContentAddress,
        round: i64,
        submitter: &ParticipantKey,
    ) -> bool {
        self.auditor.audit(address, round, submitter).await
    }
}
