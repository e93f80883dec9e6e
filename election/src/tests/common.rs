use crate::election::Election;
use crate::reader::LedgerReader;
use config::Parameters;
use crypto::{generate_keypair, PublicKey, SecretKey};
use ledger::{
    ContentAddress, Ed25519Verifier, MemoryLedger, ParticipantKey, Round, SignedSubmission,
    SubmissionPayload,
};
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const TASK_ID: &str = "H5CKDzSi2qWs7y7JGMX8sGvAZnWcUDx8k1mCMVWyJf1M";

// Fixture. Only keys of 44 base58 characters, so any two can be compared.
pub fn keys(n: usize) -> Vec<(PublicKey, SecretKey)> {
    let mut rng = StdRng::from_seed([0; 32]);
    (0..)
        .map(|_| generate_keypair(&mut rng))
        .filter(|(name, _)| name.to_base58().len() == 44)
        .take(n)
        .collect()
}

pub fn key(name: &PublicKey) -> ParticipantKey {
    ParticipantKey::from(name)
}

// A key made of one repeated base58 character.
pub fn synthetic_key(c: char) -> ParticipantKey {
    ParticipantKey::new(c.to_string().repeat(44))
}

// Fixture.
pub fn signed_blob(
    task_id: &str,
    round: Round,
    name: &PublicKey,
    secret: &SecretKey,
    identity: Option<&str>,
) -> Vec<u8> {
    let mut payload = SubmissionPayload::new(task_id, round, key(name));
    if let Some(identity) = identity {
        payload = payload.with_identity(identity);
    }
    SignedSubmission::sign(&payload, secret)
        .unwrap()
        .to_bytes()
        .unwrap()
}

// Records a valid signed submission of `name` for `round`.
pub fn submit(
    ledger: &MemoryLedger,
    round: Round,
    (name, secret): &(PublicKey, SecretKey),
    identity: Option<&str>,
) -> ContentAddress {
    let blob = signed_blob(TASK_ID, round, name, secret, identity);
    ledger.add_submission(round, key(name), blob)
}

pub fn reader(ledger: &MemoryLedger) -> LedgerReader {
    LedgerReader::new(
        Arc::new(ledger.clone()),
        Arc::new(Ed25519Verifier),
        TASK_ID,
        CancellationToken::new(),
    )
}

pub fn election(ledger: &MemoryLedger, parameters: Parameters) -> Election {
    Election::new(
        TASK_ID,
        parameters,
        Arc::new(ledger.clone()),
        Arc::new(Ed25519Verifier),
    )
}
