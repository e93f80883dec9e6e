use crate::payload::{SignedSubmission, SubmissionPayload};
use crate::types::{ParticipantKey, Round};
use crypto::{generate_keypair, PublicKey, SecretKey};
use rand::rngs::StdRng;
use rand::SeedableRng as _;

pub const TASK_ID: &str = "H5CKDzSi2qWs7y7JGMX8sGvAZnWcUDx8k1mCMVWyJf1M";

// Fixture.
pub fn keys() -> Vec<(PublicKey, SecretKey)> {
    let mut rng = StdRng::from_seed([0; 32]);
    (0..4).map(|_| generate_keypair(&mut rng)).collect()
}

// Fixture.
pub fn signed_blob(
    task_id: &str,
    round: Round,
    key: &PublicKey,
    secret: &SecretKey,
    identity: Option<&str>,
) -> Vec<u8> {
    let mut payload = SubmissionPayload::new(task_id, round, ParticipantKey::from(key));
    if let Some(identity) = identity {
        payload = payload.with_identity(identity);
    }
    SignedSubmission::sign(&payload, secret)
        .unwrap()
        .to_bytes()
        .unwrap()
}
