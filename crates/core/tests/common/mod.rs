//! Shared helpers for the engine scenario tests.

use pipesim_core::config::{Config, Discipline};
use pipesim_core::engine::Engine;
use pipesim_core::engine::trace::Trace;
use pipesim_core::isa::instruction::Instruction;
use pipesim_core::isa::parse::parse_program;

/// Parses a program from one line per entry.
pub fn program(lines: &[&str]) -> Vec<Instruction> {
    parse_program(&lines.join("\n")).expect("test program parses")
}

/// Builds a configuration for a discipline with the given issue width.
pub fn config(discipline: Discipline, issue_slots: usize, register_renaming: bool) -> Config {
    Config {
        discipline,
        issue_slots,
        register_renaming,
        ..Config::default()
    }
}

/// Parses and runs a program to completion, returning the trace.
pub fn run(lines: &[&str], cfg: &Config) -> Trace {
    let mut engine = Engine::new(program(lines), cfg).expect("valid config");
    engine.run().expect("clean run")
}

/// Issued 1-based indices for one cycle record.
pub fn issued_indices(full: &Trace, cycle: u64) -> Vec<usize> {
    full.records
        .iter()
        .find(|r| r.cycle == cycle)
        .map(|r| r.issued.iter().map(|i| i.index).collect())
        .unwrap_or_default()
}
