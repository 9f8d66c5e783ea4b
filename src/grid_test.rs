#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[test]
fn generate_has_requested_dimensions() {
    let table = GridTable::generate(80, 100, 1.5, 3.5, &mut seeded(1));
    assert_eq!(table.rows(), 80);
    assert_eq!(table.cols(), 100);
    assert_eq!(table.iter().count(), 8_000);
}

#[test]
fn phases_within_full_turn() {
    let table = GridTable::generate(80, 100, 1.5, 3.5, &mut seeded(2));
    assert!(table.iter().all(|c| (0.0..TAU).contains(&c.phase)));
}

#[test]
fn speeds_within_range() {
    let table = GridTable::generate(80, 100, 1.5, 3.5, &mut seeded(3));
    assert!(table.iter().all(|c| (1.5..3.5).contains(&c.speed)));
}

#[test]
fn values_are_not_constant() {
    let table = GridTable::generate(10, 10, 1.5, 3.5, &mut seeded(4));
    let first = table.cell(0, 0);
    assert!(table.iter().any(|c| c.phase != first.phase));
    assert!(table.iter().any(|c| c.speed != first.speed));
}

#[test]
fn same_seed_reproduces_table() {
    let a = GridTable::generate(8, 9, 1.5, 3.5, &mut seeded(42));
    let b = GridTable::generate(8, 9, 1.5, 3.5, &mut seeded(42));
    assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
}

#[test]
fn different_seeds_differ() {
    let a = GridTable::generate(8, 9, 1.5, 3.5, &mut seeded(1));
    let b = GridTable::generate(8, 9, 1.5, 3.5, &mut seeded(2));
    assert!(a.iter().zip(b.iter()).any(|(x, y)| x != y));
}

#[test]
fn cell_wraps_by_modulo() {
    let table = GridTable::generate(3, 4, 1.5, 3.5, &mut seeded(5));
    assert_eq!(table.cell(0, 0), table.cell(3, 4));
    assert_eq!(table.cell(1, 2), table.cell(7, 10));
    assert_eq!(table.cell(2, 3), table.cell(302, 403));
}

#[test]
fn cell_lookup_is_stable_across_calls() {
    let table = GridTable::generate(4, 4, 1.5, 3.5, &mut seeded(6));
    let before = table.cell(2, 1);
    for _ in 0..10 {
        assert_eq!(table.cell(2, 1), before);
    }
}

#[test]
fn zero_dimensions_clamped() {
    let table = GridTable::generate(0, 0, 1.5, 3.5, &mut seeded(7));
    assert_eq!(table.rows(), 1);
    assert_eq!(table.cols(), 1);
    assert_eq!(table.cell(12, 34), table.cell(0, 0));
}

#[test]
fn empty_speed_range_uses_minimum() {
    let table = GridTable::generate(2, 2, 2.0, 2.0, &mut seeded(8));
    assert!(table.iter().all(|c| c.speed == 2.0));
}

#[test]
fn inverted_speed_range_uses_minimum() {
    let table = GridTable::generate(2, 2, 3.0, 1.0, &mut seeded(9));
    assert!(table.iter().all(|c| c.speed == 3.0));
}

#[test]
fn overflowing_speed_span_uses_minimum() {
    let table = GridTable::generate(2, 2, -f64::MAX, f64::MAX, &mut seeded(10));
    assert!(table.iter().all(|c| c.speed == -f64::MAX));
}

#[test]
fn nan_speed_bound_uses_minimum() {
    let table = GridTable::generate(2, 2, 1.5, f64::NAN, &mut seeded(11));
    assert!(table.iter().all(|c| c.speed == 1.5));
}
