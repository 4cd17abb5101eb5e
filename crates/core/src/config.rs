//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structure and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (register bank size, issue width).
//! 2. **Discipline Selection:** The tagged variant choosing the issue policy,
//!    dispatched once at engine construction.
//! 3. **Validation:** Construction-time rejection of unusable configurations.
//!
//! Configuration is supplied via JSON (`Config::from_json`) or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline run configuration when not explicitly
/// overridden in a JSON configuration document.
mod defaults {
    /// Number of architectural registers in the bank (`R0`..`R7`).
    ///
    /// The renamer pairs each of these with one shadow register, so the
    /// physical register space is twice this size when renaming is enabled.
    pub const ARCH_REGISTERS: usize = 8;

    /// Number of per-cycle issue slots (1 = scalar issue).
    pub const ISSUE_SLOTS: usize = 1;
}

/// Issue discipline governing how the engine fills issue slots each cycle.
///
/// Selected once at engine construction; the cycle loop never re-inspects
/// the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Discipline {
    /// Strictly sequential scalar issue.
    ///
    /// Exactly one instruction is in flight at a time, and a retirement
    /// cycle never issues: the next instruction waits one full cycle.
    #[default]
    #[serde(alias = "single-issue")]
    SingleIssue,

    /// Superscalar issue in program order.
    ///
    /// Up to `issue_slots` instructions issue per cycle, strictly in program
    /// order; the first hazard ends the cycle's issue phase. Retirement is
    /// also enforced in program order.
    #[serde(alias = "in-order")]
    SuperscalarInOrder,

    /// Superscalar issue out of program order.
    ///
    /// Blocked instructions are parked and retried on later cycles without
    /// holding up independent work; retirement is unordered.
    #[serde(alias = "out-of-order")]
    SuperscalarOutOfOrder,
}

/// Root simulator configuration.
///
/// All fields have serde defaults so a partial JSON document (or `{}`)
/// deserializes to a usable configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Issue discipline for the run.
    #[serde(default)]
    pub discipline: Discipline,

    /// Number of per-cycle issue slots. Must be at least 1.
    ///
    /// Ignored by the single-issue discipline, which always has exactly one
    /// instruction in flight.
    #[serde(default = "Config::default_issue_slots")]
    pub issue_slots: usize,

    /// Enable register renaming: WAR/WAW hazards are absorbed by a shadow
    /// register bank instead of stalling. RAW hazards are never renamed away.
    #[serde(default, alias = "use_register_renaming")]
    pub register_renaming: bool,

    /// Number of architectural registers in the bank. Must be at least 1.
    #[serde(default = "Config::default_arch_registers")]
    pub arch_registers: usize,
}

impl Config {
    /// Returns the default number of issue slots.
    fn default_issue_slots() -> usize {
        defaults::ISSUE_SLOTS
    }

    /// Returns the default architectural register count.
    fn default_arch_registers() -> usize {
        defaults::ARCH_REGISTERS
    }

    /// Deserializes a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if the document is not valid JSON or does
    /// not match the configuration schema, and any `validate` error.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidIssueWidth` if `issue_slots` is zero and
    /// `SimError::InvalidRegisterCount` if `arch_registers` is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.issue_slots < 1 {
            return Err(SimError::InvalidIssueWidth(self.issue_slots));
        }
        if self.arch_registers < 1 {
            return Err(SimError::InvalidRegisterCount(self.arch_registers));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discipline: Discipline::default(),
            issue_slots: defaults::ISSUE_SLOTS,
            register_renaming: false,
            arch_registers: defaults::ARCH_REGISTERS,
        }
    }
}
