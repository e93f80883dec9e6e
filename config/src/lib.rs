use crypto::{generate_keypair, generate_production_keypair, PublicKey, SecretKey};
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::io::Write as _;
use thiserror::Error;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
pub mod config_tests;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{file}': {message}")]
    ReadError { file: String, message: String },

    #[error("Failed to write config file '{file}': {message}")]
    WriteError { file: String, message: String },
}

pub trait Config: Serialize + DeserializeOwned {
    fn read(path: &str) -> Result<Self, ConfigError> {
        let reader = || -> Result<Self, std::io::Error> {
            let data = fs::read(path)?;
            Ok(serde_json::from_slice(data.as_slice())?)
        };
        reader().map_err(|e| ConfigError::ReadError {
            file: path.to_string(),
            message: e.to_string(),
        })
    }

    fn write(&self, path: &str) -> Result<(), ConfigError> {
        let writer = || -> Result<(), std::io::Error> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let mut writer = BufWriter::new(file);
            let data = serde_json::to_string_pretty(self)?;
            writer.write_all(data.as_ref())?;
            writer.write_all(b"\n")?;
            Ok(())
        };
        writer().map_err(|e| ConfigError::WriteError {
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// What an audit concludes when the submission cannot be read at all
/// (storage unavailable or the read was cancelled). Submissions that are
/// readable but fail verification are always rejected.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditPolicy {
    FailOpen,
    FailClosed,
}

impl Default for AuditPolicy {
    fn default() -> Self {
        AuditPolicy::FailOpen
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Parameters {
    /// Number of top submitters eligible to lead a round.
    pub leader_set_size: usize,
    /// Number of prior rounds scanned to build the submission histogram.
    pub frequency_lookback: u64,
    /// Number of prior rounds searched for a leader's identity.
    pub identity_lookback: u64,
    /// A round's leader reports the leader of this many rounds earlier.
    pub previous_leader_offset: i64,
    /// Default number of participants drawn for audits.
    pub sample_size: usize,
    /// Lifetime of memoized leader selections, in milliseconds. Zero (the
    /// default) disables the cache.
    pub cache_ttl_ms: u64,
    pub audit_policy: AuditPolicy,
}

impl Config for Parameters {}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            leader_set_size: 5,
            frequency_lookback: 4,
            identity_lookback: 4,
            previous_leader_offset: 3,
            sample_size: 5,
            cache_ttl_ms: 0,
            audit_policy: AuditPolicy::default(),
        }
    }
}

/// Identity and timing of the task whose rounds are being elected.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub task_id: String,
    pub starting_slot: u64,
    /// Length of one round, in slots.
    pub round_time: u64,
}

impl Config for Task {}

#[derive(Serialize, Deserialize)]
pub struct Secret {
    pub name: PublicKey,
    pub secret: SecretKey,
}

impl Secret {
    pub fn new() -> Self {
        let (name, secret) = generate_production_keypair();
        Self { name, secret }
    }
}

impl Config for Secret {}

impl Default for Secret {
    fn default() -> Self {
        let mut rng = StdRng::from_seed([0; 32]);
        let (name, secret) = generate_keypair(&mut rng);
        Self { name, secret }
    }
}
