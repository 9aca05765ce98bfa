use std::collections::HashSet;

use rand::random_range;
use section_uid::{
    CounterConfig, SectionCounter, decode, encode, parse_section_id, validate_section_id,
};

#[test]
fn scenario_radix36_without_prefix() {
    let mut ids = SectionCounter::new();
    assert_eq!(ids.next_id(), "1");
    assert_eq!(ids.next_id(), "2");
    assert_eq!(ids.enter_scope(None), "3");
    assert_eq!(ids.active_index(), 1);
    assert_eq!(ids.next_id(), "3_1");
    assert_eq!(ids.next_id(), "3_2");
    ids.exit_scope();
    assert_eq!(ids.active_index(), 0);
    assert_eq!(ids.next_id(), "4");
}

#[test]
fn fresh_scope_counts_from_one() {
    for radix in [2, 10, 16, 36] {
        let mut ids = SectionCounter::with_prefix_and_radix(Some("p".to_string()), radix);
        ids.next_n(7);
        ids.enter_scope(None);
        for (i, id) in ids.next_n(100).iter().enumerate() {
            let suffix = id.rsplit('_').next().unwrap();
            assert_eq!(decode(suffix, radix).unwrap(), i as i64 + 1);
        }
    }
}

#[test]
fn sibling_scopes_do_not_collide() {
    let mut ids = SectionCounter::new();
    let mut seen = HashSet::new();

    for _ in 0..20 {
        ids.enter_scope(None);
        for id in ids.next_n(5) {
            assert!(seen.insert(id));
        }
        ids.exit_scope();
    }

    ids.enter_scope(Some("list"));
    ids.enter_scope(None);
    for id in ids.next_n(5) {
        assert!(seen.insert(id));
    }
}

#[test]
fn entering_does_not_advance_parent() {
    let mut ids = SectionCounter::new();
    ids.next_n(3);
    let before = ids.current_counter();
    ids.enter_scope(None);
    ids.enter_scope(None);
    ids.exit_scope();
    ids.exit_scope();
    // one silent consume per exit, on the scope that became active
    assert_eq!(ids.current_counter(), before + 1);
}

#[test]
fn exit_at_root_consumes_one() {
    let mut ids = SectionCounter::new();
    ids.next_n(9);
    let k = ids.current_counter();
    ids.exit_scope();
    assert_eq!(ids.current_counter(), k + 1);
    assert_eq!(ids.active_index(), 0);
    assert_eq!(ids.depth(), 0);
}

#[test]
fn random_nested_workload_stays_unique_and_parseable() {
    let config = CounterConfig::with_prefix("j_id");
    let mut ids = SectionCounter::from_config(&config);
    let mut seen = HashSet::new();

    for _ in 0..5_000 {
        match random_range(0..6) {
            0 if ids.depth() < 6 => {
                ids.enter_scope(None);
            }
            1 => ids.exit_scope(),
            _ => {
                let depth = ids.depth();
                let id = ids.next_id();
                assert!(validate_section_id(&id, Some("j_id"), config.radix), "{id}");
                let parsed = parse_section_id(&id, Some("j_id"), config.radix).unwrap();
                assert_eq!(parsed.segment_count(), depth);
                assert!(seen.insert(id));
            }
        }
    }
}

#[test]
fn random_values_round_trip() {
    for _ in 0..2_000 {
        let radix = random_range(2..=36u32);
        let value: i64 = random_range(i64::MIN..=i64::MAX);
        assert_eq!(decode(&encode(value, radix), radix).unwrap(), value);
    }
}
