use crate::generator::{Backreferences, FixedLengthExpander, PieceGenerator, RepeatSequencer};
use crate::pattern::{FragmentSpec, compile};

fn fragment(pattern: &str) -> FragmentSpec {
    match compile(pattern) {
        Ok(mut fragments) if !fragments.is_empty() => fragments.remove(0),
        other => panic!("'{}' should compile to a fragment, got: {:?}", pattern, other),
    }
}

fn drain_expander(spec: &FragmentSpec, count: usize, refs: &Backreferences) -> Vec<String> {
    let mut expander = FixedLengthExpander::new(count);
    let mut out = Vec::new();
    while let Some(value) = expander.next(spec, refs) {
        out.push(value);
    }
    out
}

fn take_sequence(spec: &FragmentSpec, limit: usize, refs: &Backreferences) -> Vec<String> {
    let mut sequencer = RepeatSequencer::new(spec);
    let mut out = Vec::new();
    for _ in 0..limit {
        match sequencer.next(spec, refs) {
            Some(value) => out.push(value),
            None => break,
        }
    }
    out
}

#[test]
fn test_piece_generator_walks_pieces_then_stays_exhausted() {
    let spec = fragment("(S|MM|HHH)");
    let refs = Backreferences::new();
    let mut generator = PieceGenerator::new();

    assert_eq!(generator.next(spec.unit(), &refs).as_deref(), Some("S"));
    assert_eq!(generator.next(spec.unit(), &refs).as_deref(), Some("MM"));
    assert_eq!(generator.next(spec.unit(), &refs).as_deref(), Some("HHH"));
    assert_eq!(generator.next(spec.unit(), &refs), None);
    assert_eq!(generator.next(spec.unit(), &refs), None);
}

#[test]
fn test_piece_generator_emits_backreference_once() {
    let spec = fragment("\\1");
    let mut refs = Backreferences::new();
    refs.capture(0, "AB");

    let mut generator = PieceGenerator::new();
    assert_eq!(generator.next(spec.unit(), &refs).as_deref(), Some("AB"));
    assert_eq!(generator.next(spec.unit(), &refs), None);
}

#[test]
fn test_piece_generator_unset_backreference_has_no_value() {
    let spec = fragment("\\2");
    let mut refs = Backreferences::new();
    refs.capture(0, "AB");

    let mut generator = PieceGenerator::new();
    assert_eq!(generator.next(spec.unit(), &refs), None);

    // Capturing later does not revive an exhausted generator
    refs.capture(1, "CD");
    assert_eq!(generator.next(spec.unit(), &refs), None);
}

#[test]
fn test_expander_follows_odometer_order() {
    let spec = fragment("[AB]");
    let refs = Backreferences::new();
    assert_eq!(
        drain_expander(&spec, 2, &refs),
        vec!["AA", "AB", "BA", "BB"]
    );
    assert_eq!(drain_expander(&spec, 3, &refs).len(), 8);
}

#[test]
fn test_expander_count_zero_emits_empty_once() {
    let spec = fragment("A");
    let refs = Backreferences::new();
    assert_eq!(drain_expander(&spec, 0, &refs), vec![String::new()]);
}

#[test]
fn test_expander_mixed_length_pieces() {
    let spec = fragment("(S|MM)");
    let refs = Backreferences::new();
    assert_eq!(
        drain_expander(&spec, 2, &refs),
        vec!["SS", "SMM", "MMS", "MMMM"]
    );
}

#[test]
fn test_expander_backreference_cannot_repeat() {
    let spec = fragment("\\1");
    let mut refs = Backreferences::new();
    refs.capture(0, "XY");
    assert_eq!(drain_expander(&spec, 1, &refs), vec!["XY"]);
    assert!(drain_expander(&spec, 2, &refs).is_empty());
}

#[test]
fn test_expander_stays_exhausted() {
    let spec = fragment("A");
    let refs = Backreferences::new();
    let mut expander = FixedLengthExpander::new(1);
    assert_eq!(expander.next(&spec, &refs).as_deref(), Some("A"));
    assert_eq!(expander.next(&spec, &refs), None);
    assert_eq!(expander.next(&spec, &refs), None);
}

#[test]
fn test_sequencer_optional_yields_empty_then_piece() {
    let spec = fragment("A?");
    let refs = Backreferences::new();
    assert_eq!(take_sequence(&spec, 10, &refs), vec!["", "A"]);
}

#[test]
fn test_sequencer_exactly_one_yields_pieces() {
    let spec = fragment("[CRX]");
    let refs = Backreferences::new();
    assert_eq!(take_sequence(&spec, 10, &refs), vec!["C", "R", "X"]);
}

#[test]
fn test_sequencer_star_grows_repeat_count() {
    let spec = fragment("[AB]*");
    let refs = Backreferences::new();
    let values = take_sequence(&spec, 7, &refs);
    assert_eq!(values, vec!["", "A", "B", "AA", "AB", "BA", "BB"]);
}

#[test]
fn test_sequencer_plus_never_starts_empty() {
    let spec = fragment("A+");
    let refs = Backreferences::new();
    assert_eq!(take_sequence(&spec, 3, &refs), vec!["A", "AA", "AAA"]);
}

#[test]
fn test_sequencer_dot_run_starts_at_minimum_run() {
    let spec = fragment("..+");
    let refs = Backreferences::new();
    let values = take_sequence(&spec, 1, &refs);
    assert_eq!(values, vec!["AA"]);
}

#[test]
fn test_sequencer_bare_dot_run_is_unbounded() {
    let spec = fragment("..");
    let refs = Backreferences::new();
    let values = take_sequence(&spec, 677, &refs);
    assert_eq!(values.first().map(String::as_str), Some("AA"));
    assert_eq!(values.last().map(String::as_str), Some("AAA"));
}

#[test]
fn test_sequencer_skips_to_later_count() {
    let spec = fragment("[AB]*");
    let refs = Backreferences::new();
    let mut sequencer = RepeatSequencer::new(&spec);
    assert_eq!(sequencer.next(&spec, &refs).as_deref(), Some(""));

    sequencer.skip_to(3);
    assert_eq!(sequencer.count(), 3);
    assert_eq!(sequencer.next(&spec, &refs).as_deref(), Some("AAA"));

    // Never moves backwards
    sequencer.skip_to(1);
    assert_eq!(sequencer.count(), 3);
    assert_eq!(sequencer.next(&spec, &refs).as_deref(), Some("AAB"));
}

#[test]
fn test_sequencer_skip_past_cap_exhausts() {
    let spec = fragment("A?");
    let refs = Backreferences::new();
    let mut sequencer = RepeatSequencer::new(&spec);
    sequencer.skip_to(2);
    assert!(sequencer.is_exhausted());
    assert_eq!(sequencer.next(&spec, &refs), None);
}

#[test]
fn test_sequencer_backreference_star_is_bounded() {
    let spec = fragment("\\1*");
    let mut refs = Backreferences::new();
    refs.capture(0, "QQ");
    assert_eq!(take_sequence(&spec, 10, &refs), vec!["", "QQ"]);
}

#[test]
fn test_sequencer_exhaustion_is_permanent() {
    let spec = fragment("A");
    let refs = Backreferences::new();
    let mut sequencer = RepeatSequencer::new(&spec);
    assert!(!sequencer.is_exhausted());
    assert_eq!(sequencer.next(&spec, &refs).as_deref(), Some("A"));
    assert!(!sequencer.is_exhausted());
    assert_eq!(sequencer.next(&spec, &refs), None);
    assert!(sequencer.is_exhausted());
    assert_eq!(sequencer.next(&spec, &refs), None);
}

#[test]
fn test_sequencer_shortest_remaining_tracks_count() {
    let spec = fragment("(MM|HHH)*");
    let refs = Backreferences::new();
    let mut sequencer = RepeatSequencer::new(&spec);
    assert!((sequencer.pieces_ratio() - 1.5).abs() < 1e-9);
    assert_eq!(sequencer.shortest_remaining(), 0);

    // "", then the two single repeats
    for _ in 0..3 {
        assert!(sequencer.next(&spec, &refs).is_some());
    }
    assert_eq!(sequencer.count(), 1);
    assert_eq!(sequencer.shortest_remaining(), 2);

    assert_eq!(sequencer.next(&spec, &refs).as_deref(), Some("MMMM"));
    assert_eq!(sequencer.count(), 2);
    assert_eq!(sequencer.shortest_remaining(), 4);
}

#[test]
fn test_backreferences_replace_and_release() {
    let mut refs = Backreferences::new();
    assert_eq!(refs.get(1), None);

    refs.capture(1, "B");
    assert_eq!(refs.get(1), None);
    assert_eq!(refs.get(2), Some("B"));

    refs.capture(0, "A");
    refs.capture(0, "C");
    assert_eq!(refs.get(1), Some("C"));

    refs.release(1);
    assert_eq!(refs.get(2), None);
    assert_eq!(refs.get(1), Some("C"));
    assert_eq!(refs.get(0), None);
}
