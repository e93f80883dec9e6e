use crate::error::{ElectionError, ElectionResult};
use ledger::ParticipantKey;

#[cfg(test)]
#[path = "tests/distance_tests.rs"]
pub mod distance_tests;

const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Only this many leading characters take part in the distance.
const COMPARED_CHARS: usize = 30;

// Characters outside the alphabet all map to -1.
fn alphabet_index(c: char) -> i64 {
    ALPHABET.find(c).map_or(-1, |i| i as i64)
}

/// Sum of the positional differences between the alphabet indices of the
/// first characters of `a` and `b`. Both keys must have the same length.
pub fn distance(a: &ParticipantKey, b: &ParticipantKey) -> ElectionResult<u64> {
    ensure!(
        a.as_str().chars().count() == b.as_str().chars().count(),
        ElectionError::KeyLengthMismatch {
            left: a.clone(),
            right: b.clone(),
        }
    );
    Ok(a.as_str()
        .chars()
        .zip(b.as_str().chars())
        .take(COMPARED_CHARS)
        .map(|(x, y)| (alphabet_index(x) - alphabet_index(y)).unsigned_abs())
        .sum())
}

/// The key of `keys` closest to `reference`; the first one wins a tie.
pub fn shortest_distance<'a>(
    keys: &'a [ParticipantKey],
    reference: &ParticipantKey,
) -> ElectionResult<Option<&'a ParticipantKey>> {
    let mut closest = None;
    let mut shortest = u64::MAX;
    for key in keys {
        let distance = distance(reference, key)?;
        if closest.is_none() || distance < shortest {
            shortest = distance;
            closest = Some(key);
        }
    }
    Ok(closest)
}
