//! Simulator error taxonomy.
//!
//! This module defines the single error type shared by every fallible
//! operation in the crate. It distinguishes three classes of failure:
//! 1. **Input errors:** Malformed program text or an unreadable program file;
//!    surfaced immediately with no partial-load recovery.
//! 2. **Configuration errors:** Rejected at construction, before any cycle runs.
//! 3. **Scheduler invariant violations:** Occupancy-counter underflow or an
//!    out-of-range register. These indicate a logic defect in the scheduling
//!    core and are fatal; they are never clamped or silently absorbed.
//!
//! Stalls are not errors: a hazard that blocks issue is a normal scheduling
//! outcome reported through the readiness check, not through this type.

use thiserror::Error;

use super::reg::PhysReg;

/// Errors produced by the parser, configuration validation, and the
/// scheduling core.
#[derive(Debug, Error)]
pub enum SimError {
    /// A program line did not match the instruction grammar.
    #[error("line {line}: malformed instruction: {reason}")]
    MalformedInstruction {
        /// 1-based line number in the program text.
        line: usize,
        /// Human-readable description of what was wrong with the line.
        reason: String,
    },

    /// An instruction referenced a register outside the configured bank.
    ///
    /// The scoreboard only tracks registers it was constructed with, so an
    /// out-of-range index means the program and configuration disagree.
    #[error("unregistered register {0}")]
    UnknownRegister(PhysReg),

    /// A retirement tried to decrement an occupancy counter already at zero.
    ///
    /// Every retirement must pair with exactly one successful issue; an
    /// underflow means the pairing was broken somewhere in the core.
    #[error("occupancy underflow on register {0}: retired more than issued")]
    ReleaseUnderflow(PhysReg),

    /// The configured number of issue slots was zero.
    #[error("issue_slots must be at least 1, got {0}")]
    InvalidIssueWidth(usize),

    /// The configured architectural register count was zero.
    #[error("arch_registers must be at least 1, got {0}")]
    InvalidRegisterCount(usize),

    /// A JSON configuration document failed to deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A program file could not be read.
    #[error("program file error: {0}")]
    Io(#[from] std::io::Error),
}
