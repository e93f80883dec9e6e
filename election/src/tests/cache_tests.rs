use super::*;
use crate::common::synthetic_key;

fn key(round: i64, caller: char) -> SelectionKey {
    SelectionKey {
        task_id: "task".to_string(),
        round,
        leader_set_size: 5,
        caller: synthetic_key(caller),
    }
}

fn selection(leader: char) -> LeaderSelection {
    LeaderSelection {
        chosen_key: Some(synthetic_key(leader)),
        leader_node: Some(leader.to_string()),
    }
}

#[test]
fn serves_fresh_entries() {
    let cache = SelectionCache::new(Duration::from_secs(10));
    let now = Instant::now();
    assert!(cache.get(&key(1, 'A'), now).is_none());

    cache.insert(key(1, 'A'), selection('B'), now);
    let later = now + Duration::from_secs(5);
    assert_eq!(cache.get(&key(1, 'A'), later), Some(selection('B')));
}

#[test]
fn keys_are_distinct_per_caller_and_round() {
    let cache = SelectionCache::new(Duration::from_secs(10));
    let now = Instant::now();
    cache.insert(key(1, 'A'), selection('B'), now);
    assert!(cache.get(&key(1, 'C'), now).is_none());
    assert!(cache.get(&key(2, 'A'), now).is_none());
}

#[test]
fn expired_entries_are_dropped() {
    let cache = SelectionCache::new(Duration::from_secs(10));
    let now = Instant::now();
    cache.insert(key(1, 'A'), selection('B'), now);

    let later = now + Duration::from_secs(10);
    assert!(cache.get(&key(1, 'A'), later).is_none());
    assert!(cache.is_empty());
}

#[test]
fn purge_keeps_fresh_entries() {
    let cache = SelectionCache::new(Duration::from_secs(10));
    let now = Instant::now();
    cache.insert(key(1, 'A'), selection('B'), now);
    cache.insert(key(2, 'A'), selection('C'), now + Duration::from_secs(8));
    assert_eq!(cache.len(), 2);

    cache.purge(now + Duration::from_secs(12));
    assert_eq!(cache.len(), 1);
    assert!(cache
        .get(&key(2, 'A'), now + Duration::from_secs(12))
        .is_some());
}
