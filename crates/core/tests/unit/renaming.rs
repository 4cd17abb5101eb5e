//! Register renaming: name-dependence stalls (WAR, WAW) are absorbed by the
//! shadow bank while true dependences (RAW) still serialize.

use pretty_assertions::assert_eq;

use pipesim_core::config::Discipline;

use crate::common::{config, issued_indices, run};

fn issued_text(full: &pipesim_core::Trace, index: usize) -> String {
    full.records
        .iter()
        .flat_map(|r| r.issued.iter())
        .find(|i| i.index == index)
        .map(|i| i.text.clone())
        .expect("instruction issued")
}

/// Baseline: without renaming a WAW pair serializes across cycles.
#[test]
fn waw_pair_stalls_without_renaming() {
    let cfg = config(Discipline::SuperscalarInOrder, 2, false);
    let full = run(&["R0 = R1 + R2", "R0 = R3 + R4"], &cfg);

    assert_eq!(full.issue_cycle(1), Some(1));
    assert_eq!(full.issue_cycle(2), Some(2));
}

/// With renaming the second writer lands in the shadow bank and both issue
/// in the first cycle.
#[test]
fn waw_pair_issues_together_with_renaming() {
    let cfg = config(Discipline::SuperscalarInOrder, 2, true);
    let full = run(&["R0 = R1 + R2", "R0 = R3 + R4"], &cfg);

    assert_eq!(issued_indices(&full, 1), vec![1, 2]);
    assert_eq!(issued_text(&full, 2), "S0 = R3 + R4");
}

/// A WAR conflict is renamed the same way as a WAW conflict.
#[test]
fn war_conflict_is_renamed() {
    let cfg = config(Discipline::SuperscalarInOrder, 2, true);
    let full = run(&["R0 = R1 + R2", "R1 = R3 + R4"], &cfg);

    assert_eq!(issued_indices(&full, 1), vec![1, 2]);
    assert_eq!(issued_text(&full, 2), "S1 = R3 + R4");
}

/// Each architectural register has exactly one shadow: a third writer to the
/// same register stalls until both earlier writers retire.
#[test]
fn third_writer_waits_for_the_shadow() {
    let cfg = config(Discipline::SuperscalarInOrder, 3, true);
    let full = run(
        &["R0 = R1 + R2", "R0 = R3 + R4", "R0 = R5 + R6"],
        &cfg,
    );

    assert_eq!(issued_indices(&full, 1), vec![1, 2]);
    assert_eq!(full.issue_cycle(3), Some(2));
    // By cycle 2 both writers have retired; the original name is free again.
    assert_eq!(issued_text(&full, 3), "R0 = R5 + R6");
}

/// Renaming never touches a true dependence: the consumer still waits for
/// its producer to retire.
#[test]
fn raw_dependence_still_serializes() {
    let cfg = config(Discipline::SuperscalarInOrder, 2, true);
    let full = run(&["R1 = R2 + R3", "R4 = R1 + R1"], &cfg);

    assert_eq!(full.issue_cycle(2), Some(2));
    assert_eq!(issued_text(&full, 2), "R4 = R1 + R1");
}

/// A reader of a renamed register follows the in-flight shadow writer, and
/// falls back to the architectural name once the shadow drains.
#[test]
fn reader_follows_the_shadow_writer() {
    let cfg = config(Discipline::SuperscalarInOrder, 3, true);
    let full = run(
        &["R0 = R1 + R2", "R0 = R3 * R4", "R5 = R0 + R0"],
        &cfg,
    );

    // Cycle 1: writer and renamed writer issue; the reader sees the shadow
    // still busy and stalls on a true dependence.
    assert_eq!(issued_indices(&full, 1), vec![1, 2]);
    // Cycle 3: the multiply drains from the shadow, the reader issues
    // against the architectural name.
    assert_eq!(full.issue_cycle(3), Some(3));
    assert_eq!(issued_text(&full, 3), "R5 = R0 + R0");
}

/// Renaming combines with out-of-order issue: a WAW-renamed instruction and
/// an independent one both bypass a blocked consumer.
#[test]
fn renaming_with_out_of_order_issue() {
    let cfg = config(Discipline::SuperscalarOutOfOrder, 3, true);
    let full = run(
        &["R1 = R2 * R3", "R4 = R1 + R1", "R1 = R5 + R6"],
        &cfg,
    );

    // Instruction 2 is RAW-blocked; instruction 3 is WAW against the
    // in-flight multiply and renames into S1.
    assert_eq!(issued_indices(&full, 1), vec![1, 3]);
    assert_eq!(issued_text(&full, 3), "S1 = R5 + R6");
    assert_eq!(full.retired_count(), 3);
}
