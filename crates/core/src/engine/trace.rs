//! Per-cycle simulation trace records.
//!
//! The engine emits one `CycleRecord` per cycle: which instructions issued
//! (by 1-based program index, with their rendered text) and which retired.
//! A `Trace` is the full run, consumable as structured data independent of
//! any text rendering; the CLI turns it into a table or JSON.

use serde::Serialize;

use crate::common::error::SimError;
use crate::isa::instruction::Instruction;
use crate::sched::Reservation;

/// One instruction admitted during a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    /// 1-based position of the instruction in the original program.
    pub index: usize,
    /// Rendered instruction text, using the effective registers (shadow
    /// registers appear here when the destination or a source was renamed).
    pub text: String,
}

/// Everything that happened in one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// Cycle number, counting from 1.
    pub cycle: u64,
    /// Instructions admitted this cycle, in issue order.
    pub issued: Vec<IssueRecord>,
    /// 1-based program indices of instructions retired this cycle.
    pub retired: Vec<usize>,
}

/// A complete run: one record per simulated cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    /// Per-cycle records, in cycle order.
    pub records: Vec<CycleRecord>,
}

impl Trace {
    /// Total number of simulated cycles.
    pub fn cycles(&self) -> u64 {
        self.records.last().map_or(0, |r| r.cycle)
    }

    /// Cycle in which the instruction at 1-based `index` issued.
    pub fn issue_cycle(&self, index: usize) -> Option<u64> {
        self.records
            .iter()
            .find(|r| r.issued.iter().any(|i| i.index == index))
            .map(|r| r.cycle)
    }

    /// Cycle in which the instruction at 1-based `index` retired.
    pub fn retire_cycle(&self, index: usize) -> Option<u64> {
        self.records
            .iter()
            .find(|r| r.retired.contains(&index))
            .map(|r| r.cycle)
    }

    /// Total instructions issued over the run.
    pub fn issued_count(&self) -> usize {
        self.records.iter().map(|r| r.issued.len()).sum()
    }

    /// Total instructions retired over the run.
    pub fn retired_count(&self) -> usize {
        self.records.iter().map(|r| r.retired.len()).sum()
    }

    /// All retirement events in cycle order, as `(cycle, index)` pairs.
    ///
    /// Within a cycle, pairs appear in the order the engine retired them.
    pub fn retirement_events(&self) -> Vec<(u64, usize)> {
        self.records
            .iter()
            .flat_map(|r| r.retired.iter().map(|&idx| (r.cycle, idx)))
            .collect()
    }

    /// Serializes the trace as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if serialization fails.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Renders an admitted instruction with the registers it actually occupies.
///
/// Renamed destinations and sources show their shadow names (`S<n>`), which
/// is what the original program's reader needs to follow a renamed value.
pub(crate) fn render_issue(inst: &Instruction, res: &Reservation) -> String {
    match res.reads {
        Some((lhs, rhs)) => format!("{} = {} {} {}", res.dest, lhs, inst.op, rhs),
        None => format!("{} = {}", res.dest, inst.op),
    }
}
