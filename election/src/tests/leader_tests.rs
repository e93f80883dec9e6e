use super::*;
use crate::common::{synthetic_key, TASK_ID};
use std::collections::HashSet;

fn history(counts: &[(char, u64)]) -> History {
    let mut history = History::default();
    for (c, count) in counts {
        history.frequency.insert(synthetic_key(*c), *count);
    }
    history
}

#[test]
fn pool_is_top_submitters() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 5), ('B', 4), ('C', 3), ('D', 1)]);
    let pool = resolver.candidate_pool(&history, 2);
    assert_eq!(pool, vec![synthetic_key('A'), synthetic_key('B')]);
}

#[test]
fn pool_shrinks_to_available_keys() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 5), ('B', 4)]);
    assert_eq!(resolver.candidate_pool(&history, 10).len(), 2);
}

#[test]
fn empty_pool() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    assert!(resolver.candidate_pool(&History::default(), 5).is_empty());
    let history = history(&[('A', 5)]);
    assert!(resolver.candidate_pool(&history, 0).is_empty());
}

#[test]
fn tied_keys_share_remaining_seats() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 5), ('B', 5), ('C', 5)]);
    let pool = resolver.candidate_pool(&history, 2);
    assert_eq!(pool.len(), 2);

    let tied: HashSet<_> = vec![synthetic_key('A'), synthetic_key('B'), synthetic_key('C')]
        .into_iter()
        .collect();
    let chosen: HashSet<_> = pool.iter().cloned().collect();
    assert_eq!(chosen.len(), 2);
    assert!(chosen.is_subset(&tied));

    // Every participant computes the same pool.
    let again = LeaderSetResolver::new(TASK_ID).candidate_pool(&history, 2);
    assert_eq!(pool, again);
}

#[test]
fn keys_above_tie_always_included() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 9), ('B', 5), ('C', 5), ('D', 5)]);
    let pool = resolver.candidate_pool(&history, 3);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool[0], synthetic_key('A'));
    assert!(pool[1..].iter().all(|key| *key != synthetic_key('A')));
}

#[test]
fn tie_filling_pool_exactly_needs_no_shuffle() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 5), ('C', 3), ('B', 3)]);
    let pool = resolver.candidate_pool(&history, 3);
    assert_eq!(
        pool,
        vec![synthetic_key('A'), synthetic_key('B'), synthetic_key('C')]
    );
}

#[test]
fn flagged_keys_never_in_pool() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let mut history = history(&[('A', 9), ('B', 1)]);
    history.audit_flagged.insert(synthetic_key('A'));
    let pool = resolver.candidate_pool(&history, 1);
    assert_eq!(pool, vec![synthetic_key('B')]);
}

#[test]
fn leader_is_closest_candidate() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 3), ('z', 3)]);
    let leader = resolver
        .select_leader(&history, 2, &synthetic_key('y'))
        .unwrap();
    assert_eq!(leader, Some(synthetic_key('z')));
    let leader = resolver
        .select_leader(&history, 2, &synthetic_key('B'))
        .unwrap();
    assert_eq!(leader, Some(synthetic_key('A')));
}

#[test]
fn single_seat_ignores_caller() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let history = history(&[('A', 3), ('z', 1)]);
    for caller in &['y', 'z', '1'] {
        let leader = resolver
            .select_leader(&history, 1, &synthetic_key(*caller))
            .unwrap();
        assert_eq!(leader, Some(synthetic_key('A')));
    }
}

#[test]
fn no_leader_without_candidates() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let leader = resolver
        .select_leader(&History::default(), 5, &synthetic_key('A'))
        .unwrap();
    assert!(leader.is_none());
}

#[test]
fn mismatched_key_lengths_fail() {
    let resolver = LeaderSetResolver::new(TASK_ID);
    let mut history = History::default();
    history.frequency.insert(ParticipantKey::new("short"), 2);
    assert!(resolver
        .select_leader(&history, 5, &synthetic_key('A'))
        .is_err());
}
