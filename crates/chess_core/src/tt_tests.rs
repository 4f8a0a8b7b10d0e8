use super::*;
use crate::types::Move;

const CAPACITY: usize = 16;

fn small_config(slack: usize) -> TranspositionConfig {
    TranspositionConfig {
        capacity: CAPACITY,
        slack,
        ..TranspositionConfig::default()
    }
}

fn line(score: i32) -> Line {
    let mut l = Line::new(0);
    l.push(Move::new(crate::square::E1, crate::square::E8), score);
    l
}

fn pos_a() -> Position {
    Position::startpos()
}

fn pos_b() -> Position {
    Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap()
}

#[test]
fn test_store_and_hit() {
    let mut tt = TranspositionTable::new(small_config(4));
    let p = pos_a();
    tt.insert(&p, 3, &line(42));
    assert_eq!(tt.stats().filled, 1);

    assert_eq!(tt.lookup(&p, 3).map(|l| l.score()), Some(42));
    assert_eq!(tt.lookup(&p, 5).map(|l| l.score()), Some(42));
    assert_eq!(tt.stats().hits, 2);
}

#[test]
fn test_depth_window() {
    let mut tt = TranspositionTable::new(small_config(4));
    let p = pos_a();
    tt.insert(&p, 2, &line(1));
    tt.insert(&p, 7, &line(1));
    assert_eq!(tt.stats().filled, 0);

    // Below the probe depth nothing is counted
    assert!(tt.lookup(&p, 2).is_none());
    assert_eq!(tt.stats(), TtStats::default());
}

#[test]
fn test_entry_stored_deeper_is_depth_collision() {
    let mut tt = TranspositionTable::new(small_config(4));
    let p = pos_a();
    tt.insert(&p, 5, &line(9));
    assert!(tt.lookup(&p, 4).is_none());
    let stats = tt.stats();
    assert_eq!(stats.depth_collisions, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_equal_hash_different_position_is_collision() {
    let mut tt = TranspositionTable::new(small_config(4));
    let a = pos_a();
    let mut b = pos_b();
    b.force_hash(a.hash());

    tt.insert(&a, 3, &line(5));
    assert!(tt.lookup(&b, 3).is_none());
    let stats = tt.stats();
    assert_eq!(stats.collisions, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 0);

    // The colliding position gets its own slot
    tt.insert(&b, 3, &line(6));
    assert_eq!(tt.stats().filled, 2);
    assert_eq!(tt.lookup(&b, 3).map(|l| l.score()), Some(6));
    assert_eq!(tt.lookup(&a, 3).map(|l| l.score()), Some(5));
}

#[test]
fn test_same_home_slot_is_hash_collision() {
    let mut tt = TranspositionTable::new(small_config(4));
    let mut a = pos_a();
    let mut b = pos_b();
    a.force_hash(3);
    b.force_hash(3 + CAPACITY as u64);

    tt.insert(&a, 3, &line(5));
    assert!(tt.lookup(&b, 3).is_none());
    assert_eq!(tt.stats().hash_collisions, 1);
}

#[test]
fn test_shallower_entry_replaces_deeper() {
    let mut tt = TranspositionTable::new(small_config(4));
    let p = pos_a();
    tt.insert(&p, 5, &line(1));
    tt.insert(&p, 3, &line(2));
    assert_eq!(tt.stats().filled, 1);
    assert_eq!(tt.lookup(&p, 3).map(|l| l.score()), Some(2));

    // Same or deeper tree depth keeps the existing entry
    tt.insert(&p, 4, &line(3));
    tt.insert(&p, 3, &line(4));
    assert_eq!(tt.stats().filled, 1);
    assert_eq!(tt.lookup(&p, 6).map(|l| l.score()), Some(2));
}

#[test]
fn test_probe_past_end_is_not_cached() {
    let mut tt = TranspositionTable::new(small_config(0));
    let mut a = pos_a();
    let mut b = pos_b();
    a.force_hash(CAPACITY as u64 - 1);
    b.force_hash(CAPACITY as u64 - 1);

    tt.insert(&a, 3, &line(1));
    tt.insert(&b, 3, &line(2));
    assert_eq!(tt.stats().filled, 1);
    assert!(tt.lookup(&b, 3).is_none());
}

#[test]
fn test_slack_absorbs_overflow_at_the_tail() {
    let mut tt = TranspositionTable::new(small_config(2));
    let mut a = pos_a();
    let mut b = pos_b();
    a.force_hash(CAPACITY as u64 - 1);
    b.force_hash(CAPACITY as u64 - 1);

    tt.insert(&a, 3, &line(1));
    tt.insert(&b, 3, &line(2));
    assert_eq!(tt.stats().filled, 2);
    assert_eq!(tt.lookup(&b, 3).map(|l| l.score()), Some(2));
}

#[test]
fn test_reset_returns_and_clears_stats() {
    let mut tt = TranspositionTable::new(small_config(4));
    let p = pos_a();
    tt.insert(&p, 3, &line(1));
    tt.lookup(&p, 3);

    let old = tt.reset();
    assert_eq!(old.filled, 1);
    assert_eq!(old.hits, 1);
    assert_eq!(tt.stats(), TtStats::default());
    assert!(tt.lookup(&p, 3).is_none());
}

#[test]
fn test_disabled_table_caches_nothing() {
    let mut tt = TranspositionTable::new(TranspositionConfig {
        enabled: false,
        ..TranspositionConfig::default()
    });
    let p = pos_a();
    tt.insert(&p, 3, &line(1));
    assert!(tt.lookup(&p, 3).is_none());
    assert_eq!(tt.stats(), TtStats::default());
}

#[test]
fn test_stats_line_format() {
    let stats = TtStats {
        filled: 1,
        hits: 2,
        misses: 3,
        collisions: 4,
        hash_collisions: 5,
        depth_collisions: 6,
    };
    assert_eq!(
        stats.to_string(),
        "filled 1 read 2 not_read 3 collisions 4 hash_collisions 5 depth_collisions 6"
    );
}
