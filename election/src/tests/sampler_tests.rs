use super::*;
use crate::common::{reader, synthetic_key};
use ledger::MemoryLedger;
use std::collections::HashSet;

fn populate(ledger: &MemoryLedger, round: u64, names: &str) -> Vec<ParticipantKey> {
    names
        .chars()
        .map(|c| {
            let key = synthetic_key(c);
            ledger.add_submission(round, key.clone(), vec![c as u8]);
            key
        })
        .collect()
}

#[tokio::test]
async fn everyone_when_few() {
    let ledger = MemoryLedger::new();
    let mut expected = populate(&ledger, 4, "ABC");
    let sampler = RandomNodeSampler::new(reader(&ledger));

    let mut sample = sampler.sample(5, 3).await;
    sample.sort();
    expected.sort();
    assert_eq!(sample, expected);
    assert_eq!(sampler.sample(5, 10).await.len(), 3);
}

#[tokio::test]
async fn draws_distinct_subset() {
    let ledger = MemoryLedger::new();
    let available: HashSet<_> = populate(&ledger, 4, "ABCDEFGH").into_iter().collect();
    let sampler = RandomNodeSampler::new(reader(&ledger));

    let sample = sampler.sample(5, 3).await;
    let drawn: HashSet<_> = sample.iter().cloned().collect();
    assert_eq!(sample.len(), 3);
    assert_eq!(drawn.len(), 3);
    assert!(drawn.is_subset(&available));
}

#[tokio::test]
async fn sample_is_reproducible() {
    let ledger = MemoryLedger::new();
    populate(&ledger, 4, "ABCDEFGH");

    let a = RandomNodeSampler::new(reader(&ledger)).sample(5, 3).await;
    let b = RandomNodeSampler::new(reader(&ledger)).sample(5, 3).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn nothing_before_round_zero() {
    let ledger = MemoryLedger::new();
    populate(&ledger, 0, "ABC");
    let sampler = RandomNodeSampler::new(reader(&ledger));
    assert!(sampler.sample(0, 3).await.is_empty());
    assert_eq!(sampler.sample(1, 3).await.len(), 3);
}

#[tokio::test]
async fn nothing_when_unavailable() {
    let ledger = MemoryLedger::new();
    populate(&ledger, 4, "ABC");
    ledger.set_round_unavailable(4);
    let sampler = RandomNodeSampler::new(reader(&ledger));
    assert!(sampler.sample(5, 3).await.is_empty());
}

#[tokio::test]
async fn zero_requested() {
    let ledger = MemoryLedger::new();
    populate(&ledger, 4, "ABC");
    let sampler = RandomNodeSampler::new(reader(&ledger));
    assert!(sampler.sample(5, 0).await.is_empty());
}

#[tokio::test]
async fn lowest_round_is_empty() {
    let ledger = MemoryLedger::new();
    populate(&ledger, 0, "ABC");
    let sampler = RandomNodeSampler::new(reader(&ledger));
    assert!(sampler.sample(i64::MIN, 3).await.is_empty());
}
