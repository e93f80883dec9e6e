use crate::error::LedgerResult;
use crate::types::{ParticipantKey, Round};
use crypto::{CryptoError, PublicKey, SecretKey, Signature};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[cfg(test)]
#[path = "tests/payload_tests.rs"]
pub mod payload_tests;

/// The message a participant signs when it submits work for a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub task_id: String,
    pub round_number: Round,
    pub staking_key: ParticipantKey,
    /// Reportable identity of the submitter, e.g. an external username.
    #[serde(default, alias = "githubUsername", skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Task-specific fields carried along untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmissionPayload {
    pub fn new(task_id: &str, round_number: Round, staking_key: ParticipantKey) -> Self {
        Self {
            task_id: task_id.to_string(),
            round_number,
            staking_key,
            identity: None,
            extra: Map::new(),
        }
    }

    pub fn with_identity(self, identity: &str) -> Self {
        Self {
            identity: Some(identity.to_string()),
            ..self
        }
    }

    pub fn decode(data: &str) -> LedgerResult<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Content of a submission blob: the exact signed text and its signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedSubmission {
    pub data: String,
    pub signature: String,
}

impl SignedSubmission {
    pub fn sign(payload: &SubmissionPayload, secret: &SecretKey) -> LedgerResult<Self> {
        let data = serde_json::to_string(payload)?;
        let signature = Signature::new(data.as_bytes(), secret)?.to_base58();
        Ok(Self { data, signature })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Malformed signature: {0}")]
    MalformedSignature(CryptoError),

    #[error("Malformed public key: {0}")]
    MalformedKey(CryptoError),

    #[error("Signature does not match the signed data")]
    Mismatch(CryptoError),
}

/// Checks that a submission was signed by `key` and returns the signed text.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, signed: &SignedSubmission, key: &ParticipantKey)
        -> Result<String, VerifyError>;
}

pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        signed: &SignedSubmission,
        key: &ParticipantKey,
    ) -> Result<String, VerifyError> {
        let signature =
            Signature::from_base58(&signed.signature).map_err(VerifyError::MalformedSignature)?;
        let public_key = PublicKey::from_base58(key.as_str()).map_err(VerifyError::MalformedKey)?;
        signature
            .verify(signed.data.as_bytes(), &public_key)
            .map_err(VerifyError::Mismatch)?;
        Ok(signed.data.clone())
    }
}
