//! Single-issue discipline: one instruction in flight, with a one-cycle
//! bubble after each retirement.

use pretty_assertions::assert_eq;

use pipesim_core::config::{Config, Discipline};

use crate::common::{config, issued_indices, run};

fn single_issue() -> Config {
    config(Discipline::SingleIssue, 1, false)
}

/// The reference scenario: an add (1 cycle) followed by a store (3 cycles).
/// The store may not issue on the add's retirement cycle, so it waits until
/// cycle 3 and retires at 6.
#[test]
fn add_then_store_timing() {
    let full = run(&["R0 = R1 + R2", "R3 = Store"], &single_issue());

    assert_eq!(full.issue_cycle(1), Some(1));
    assert_eq!(full.retire_cycle(1), Some(2));
    assert_eq!(full.issue_cycle(2), Some(3));
    assert_eq!(full.retire_cycle(2), Some(6));
    assert_eq!(full.cycles(), 6);
}

/// A retirement cycle never issues: no record contains both events.
#[test]
fn retirement_and_issue_never_share_a_cycle() {
    let full = run(
        &["R0 = R1 * R2", "R3 = Load", "R4 = R5 - R6"],
        &single_issue(),
    );

    for record in &full.records {
        assert!(
            record.issued.is_empty() || record.retired.is_empty(),
            "cycle {} both issued and retired",
            record.cycle
        );
    }
}

/// With one instruction in flight at a time there is never a hazard, so
/// every instruction retires exactly at issue cycle + latency.
#[test]
fn retirement_exactly_on_deadline() {
    let lines = ["R0 = R1 + R2", "R0 = R0 * R0", "R0 = Store"];
    let latencies = [1, 2, 3];
    let full = run(&lines, &single_issue());

    for (idx, latency) in latencies.iter().enumerate() {
        let index = idx + 1;
        let issued = full.issue_cycle(index).expect("issued");
        let retired = full.retire_cycle(index).expect("retired");
        assert_eq!(retired, issued + latency);
    }
}

/// Dependent instructions behave no differently: the discipline serializes
/// everything, hazards or not.
#[test]
fn dependent_chain_is_serialized() {
    let full = run(&["R1 = R0 + R0", "R2 = R1 + R1"], &single_issue());

    assert_eq!(issued_indices(&full, 1), vec![1]);
    assert_eq!(full.retire_cycle(1), Some(2));
    assert_eq!(full.issue_cycle(2), Some(3));
    assert_eq!(full.cycles(), 4);
}
