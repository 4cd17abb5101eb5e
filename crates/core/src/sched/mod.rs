//! Hazard scheduling: occupancy scoreboards and register renaming.
//!
//! This module owns the only shared mutable state in the simulator, the
//! per-register occupancy counters. It provides:
//! 1. **Hazard Classification:** RAW, WAR, and WAW detection with a fixed
//!    precedence (RAW is checked first and short-circuits).
//! 2. **Check-and-Reserve:** Admission of one instruction at a time; a
//!    successful check atomically reserves the registers it will occupy.
//! 3. **Renaming:** A shadow-bank variant that absorbs WAR/WAW hazards by
//!    redirecting the destination to a dedicated shadow register.
//!
//! The engine never touches the counters directly; it only calls
//! `try_issue` and `retire`.

use std::fmt;

use crate::common::reg::PhysReg;
use crate::config::Config;
use crate::isa::instruction::Instruction;

/// Occupancy scoreboard without renaming.
pub mod scoreboard;

/// Occupancy scoreboard with a shadow register bank.
pub mod rename;

pub use rename::RenameScoreboard;
pub use scoreboard::Scoreboard;

use crate::common::error::SimError;

/// Register hazard classes, in check precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// A source operand has a pending writer. A genuine data dependency;
    /// never renamed away.
    ReadAfterWrite,
    /// The destination has pending readers.
    WriteAfterRead,
    /// The destination has a pending writer.
    WriteAfterWrite,
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadAfterWrite => f.write_str("RAW"),
            Self::WriteAfterRead => f.write_str("WAR"),
            Self::WriteAfterWrite => f.write_str("WAW"),
        }
    }
}

/// The registers a successfully issued instruction occupies until it retires.
///
/// A reservation records exactly what `try_issue` incremented, so `retire`
/// releases the same registers even when the destination was renamed to a
/// shadow register. The parsed `Instruction` itself is never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// Effective destination: the architectural register, or its shadow when
    /// the renamer redirected the write.
    pub dest: PhysReg,
    /// Effective source operands; `None` for Store/Load.
    pub reads: Option<(PhysReg, PhysReg)>,
}

/// Scheduler variant, selected once from the configuration.
#[derive(Debug)]
pub enum Scheduler {
    /// Plain hazard detection: every hazard stalls.
    Basic(Scoreboard),
    /// Hazard detection with shadow-bank renaming for WAR/WAW.
    Renaming(RenameScoreboard),
}

impl Scheduler {
    /// Builds the scheduler variant the configuration asks for.
    pub fn from_config(config: &Config) -> Self {
        if config.register_renaming {
            Self::Renaming(RenameScoreboard::new(config.arch_registers))
        } else {
            Self::Basic(Scoreboard::new(config.arch_registers))
        }
    }

    /// Checks the instruction for hazards and, if it is ready, reserves its
    /// registers in the same call.
    ///
    /// Returns `Ok(None)` when a hazard blocks issue; no reservation survives
    /// a blocked attempt.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownRegister` if the instruction names a
    /// register outside the configured bank.
    pub fn try_issue(&mut self, inst: &Instruction) -> Result<Option<Reservation>, SimError> {
        match self {
            Self::Basic(board) => board.try_issue(inst),
            Self::Renaming(board) => board.try_issue(inst),
        }
    }

    /// Releases the registers a retired instruction occupied.
    ///
    /// Must be called exactly once per successful `try_issue`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ReleaseUnderflow` if a counter is already zero;
    /// this indicates a logic defect and is fatal.
    pub fn retire(&mut self, res: &Reservation) -> Result<(), SimError> {
        match self {
            Self::Basic(board) => board.retire(res),
            Self::Renaming(board) => board.retire(res),
        }
    }
}
