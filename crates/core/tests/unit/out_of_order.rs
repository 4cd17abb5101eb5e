//! Superscalar out-of-order discipline: blocked instructions are parked and
//! retried without holding up independent work; retirement is unordered.

use pretty_assertions::assert_eq;

use pipesim_core::config::Discipline;

use crate::common::{config, issued_indices, run};

/// A RAW chain still serializes: the consumer never issues before its
/// producer retires.
#[test]
fn raw_chain_waits_for_the_producer() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 2, false);
    let full = run(&["R1 = R0 + R0", "R2 = R1 + R1"], &cfg);

    let producer_retired = full.retire_cycle(1).expect("retired");
    let consumer_issued = full.issue_cycle(2).expect("issued");
    assert!(consumer_issued >= producer_retired);
    assert_eq!(producer_retired, 2);
    assert_eq!(consumer_issued, 2);
}

/// Instructions with no shared registers issue in the same cycle when
/// slots allow.
#[test]
fn independent_pair_dual_issues() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 2, false);
    let full = run(&["R3 = Load", "R4 = Store"], &cfg);

    assert_eq!(issued_indices(&full, 1), vec![1, 2]);
    assert_eq!(full.retire_cycle(1), Some(4));
    assert_eq!(full.retire_cycle(2), Some(4));
}

/// A blocked instruction is parked without consuming a slot, so independent
/// work behind it issues the same cycle.
#[test]
fn blocked_instruction_does_not_hold_a_slot() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 2, false);
    let full = run(
        &["R1 = R2 + R3", "R4 = R1 + R1", "R5 = R6 + R7"],
        &cfg,
    );

    // Instruction 2 is RAW-blocked on R1; instruction 3 takes the second
    // slot in cycle 1.
    assert_eq!(issued_indices(&full, 1), vec![1, 3]);
    assert_eq!(full.issue_cycle(2), Some(2));
}

/// Parked instructions are retried in program order, before any new
/// instruction from the unissued tail.
#[test]
fn deferred_instructions_retry_in_program_order() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 2, false);
    let full = run(
        &["R1 = R2 + R3", "R4 = R1 + R1", "R5 = R1 + R2"],
        &cfg,
    );

    // Both consumers of R1 park in cycle 1 and issue together in cycle 2,
    // lowest index first.
    assert_eq!(issued_indices(&full, 1), vec![1]);
    assert_eq!(issued_indices(&full, 2), vec![2, 3]);
}

/// Retirement is unordered: a short-latency instruction retires ahead of a
/// longer one issued earlier.
#[test]
fn retirement_ignores_program_order() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 2, false);
    let full = run(&["R0 = Load", "R1 = R2 + R3"], &cfg);

    assert_eq!(full.retire_cycle(2), Some(2));
    assert_eq!(full.retire_cycle(1), Some(4));
}

/// The engine drains only after the deferred set empties: every parked
/// instruction eventually issues and retires.
#[test]
fn parked_instructions_are_never_lost() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 3, false);
    let full = run(
        &[
            "R1 = R2 * R3",
            "R4 = R1 + R1",
            "R5 = R4 + R1",
            "R6 = Store",
        ],
        &cfg,
    );

    assert_eq!(full.issued_count(), 4);
    assert_eq!(full.retired_count(), 4);
}
