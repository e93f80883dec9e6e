use crypto::Hash as _;
use crypto::PublicKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(test)]
#[path = "tests/types_tests.rs"]
pub mod types_tests;

pub type Round = u64;

/// Text identifier of a participant (the base58 form of its public key).
/// Compared by value only.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantKey(String);

impl ParticipantKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&PublicKey> for ParticipantKey {
    fn from(key: &PublicKey) -> Self {
        Self(key.to_base58())
    }
}

impl From<PublicKey> for ParticipantKey {
    fn from(key: PublicKey) -> Self {
        Self::from(&key)
    }
}

impl fmt::Debug for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Address of a blob: base58 of the digest of its bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    pub fn of(bytes: &[u8]) -> Self {
        Self(bytes.digest().to_base58())
    }

    pub fn new<S: Into<String>>(address: S) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `bytes` are the content this address names.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        *self == Self::of(bytes)
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_value: ContentAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditVote {
    pub voter: ParticipantKey,
    pub is_valid: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrigger {
    pub votes: Vec<AuditVote>,
}

pub type RoundSubmissions = BTreeMap<ParticipantKey, SubmissionRecord>;

/// What the ledger reports for one round: the submissions made, and the
/// participants an audit was triggered against. Both maps are keyed by round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSubmissionInfo {
    pub submissions: BTreeMap<Round, RoundSubmissions>,
    pub submissions_audit_trigger: BTreeMap<Round, BTreeMap<ParticipantKey, AuditTrigger>>,
}

impl RoundSubmissionInfo {
    /// Submissions of the highest round present.
    pub fn latest_submissions(&self) -> Option<&RoundSubmissions> {
        self.submissions.values().next_back()
    }

    /// Every submitter of every round present, once per round submitted.
    pub fn submitters(&self) -> impl Iterator<Item = &ParticipantKey> {
        self.submissions.values().flat_map(|round| round.keys())
    }

    /// Every participant with an audit trigger in any round present.
    pub fn audit_flagged(&self) -> impl Iterator<Item = &ParticipantKey> {
        self.submissions_audit_trigger
            .values()
            .flat_map(|round| round.keys())
    }

    pub fn insert_submission(&mut self, round: Round, key: ParticipantKey, record: SubmissionRecord) {
        self.submissions
            .entry(round)
            .or_insert_with(BTreeMap::new)
            .insert(key, record);
    }

    pub fn insert_audit_vote(&mut self, round: Round, key: ParticipantKey, vote: AuditVote) {
        self.submissions_audit_trigger
            .entry(round)
            .or_insert_with(BTreeMap::new)
            .entry(key)
            .or_insert_with(AuditTrigger::default)
            .votes
            .push(vote);
    }
}
