//! Per-register occupancy scoreboard.
//!
//! The scoreboard keeps two counters per register: pending writers and
//! pending readers. Counters are incremented when an instruction is admitted
//! and decremented exactly once when it retires. Issue is gated on three
//! hazard classes checked in a fixed precedence: RAW on the source operands
//! (skipped for Store/Load, which have none), then WAR and WAW on the
//! destination.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::common::reg::PhysReg;
use crate::isa::instruction::Instruction;
use crate::sched::{Hazard, Reservation};

/// One bank of occupancy counters, indexed by register number.
///
/// A bank does not know which namespace it tracks; callers pass the full
/// `PhysReg` so bounds errors name the register that caused them.
#[derive(Debug)]
pub(crate) struct Bank {
    writers: Vec<u32>,
    readers: Vec<u32>,
}

impl Bank {
    /// Creates a bank of `size` registers with all counters at zero.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            writers: vec![0; size],
            readers: vec![0; size],
        }
    }

    fn slot(counters: &[u32], reg: PhysReg) -> Result<usize, SimError> {
        let idx = usize::from(reg.index());
        if idx >= counters.len() {
            return Err(SimError::UnknownRegister(reg));
        }
        Ok(idx)
    }

    /// Number of pending writers for `reg`.
    pub(crate) fn writers(&self, reg: PhysReg) -> Result<u32, SimError> {
        Ok(self.writers[Self::slot(&self.writers, reg)?])
    }

    /// Number of pending readers for `reg`.
    pub(crate) fn readers(&self, reg: PhysReg) -> Result<u32, SimError> {
        Ok(self.readers[Self::slot(&self.readers, reg)?])
    }

    /// Records one more pending writer for `reg`.
    pub(crate) fn acquire_write(&mut self, reg: PhysReg) -> Result<(), SimError> {
        let idx = Self::slot(&self.writers, reg)?;
        self.writers[idx] += 1;
        Ok(())
    }

    /// Records one more pending reader for `reg`.
    pub(crate) fn acquire_read(&mut self, reg: PhysReg) -> Result<(), SimError> {
        let idx = Self::slot(&self.readers, reg)?;
        self.readers[idx] += 1;
        Ok(())
    }

    /// Releases one pending writer for `reg`.
    ///
    /// Decrementing a counter already at zero is an invariant violation,
    /// never clamped.
    pub(crate) fn release_write(&mut self, reg: PhysReg) -> Result<(), SimError> {
        let idx = Self::slot(&self.writers, reg)?;
        if self.writers[idx] == 0 {
            return Err(SimError::ReleaseUnderflow(reg));
        }
        self.writers[idx] -= 1;
        Ok(())
    }

    /// Releases one pending reader for `reg`.
    pub(crate) fn release_read(&mut self, reg: PhysReg) -> Result<(), SimError> {
        let idx = Self::slot(&self.readers, reg)?;
        if self.readers[idx] == 0 {
            return Err(SimError::ReleaseUnderflow(reg));
        }
        self.readers[idx] -= 1;
        Ok(())
    }

    /// Whether every counter in the bank is zero.
    pub(crate) fn is_idle(&self) -> bool {
        self.writers.iter().all(|&c| c == 0) && self.readers.iter().all(|&c| c == 0)
    }
}

/// Occupancy scoreboard without renaming: every hazard stalls.
#[derive(Debug)]
pub struct Scoreboard {
    bank: Bank,
}

impl Scoreboard {
    /// Creates a scoreboard tracking `arch_registers` registers, all idle.
    pub fn new(arch_registers: usize) -> Self {
        Self {
            bank: Bank::new(arch_registers),
        }
    }

    /// Classifies the hazard blocking `inst`, or `None` when it is ready.
    ///
    /// Precedence: RAW on the operands first (short-circuits), then WAR on
    /// the destination, then WAW. Store/Load have no operands, so they never
    /// see a RAW hazard as consumers.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownRegister` for registers outside the bank.
    pub fn classify(&self, inst: &Instruction) -> Result<Option<Hazard>, SimError> {
        if let Some((lhs, rhs)) = inst.operands() {
            if self.bank.writers(lhs.into())? > 0 || self.bank.writers(rhs.into())? > 0 {
                return Ok(Some(Hazard::ReadAfterWrite));
            }
        }
        let dest = PhysReg::from(inst.dest);
        if self.bank.readers(dest)? != 0 {
            return Ok(Some(Hazard::WriteAfterRead));
        }
        if self.bank.writers(dest)? != 0 {
            return Ok(Some(Hazard::WriteAfterWrite));
        }
        Ok(None)
    }

    /// Checks `inst` for hazards; when ready, reserves its registers and
    /// returns the reservation. Check and reserve form one atomic step: no
    /// reservation survives a blocked attempt, and a successful reservation
    /// is visible to the next check.
    pub fn try_issue(&mut self, inst: &Instruction) -> Result<Option<Reservation>, SimError> {
        if let Some(hazard) = self.classify(inst)? {
            debug!(%hazard, inst = %inst, "issue blocked");
            return Ok(None);
        }
        let res = Reservation {
            dest: inst.dest.into(),
            reads: inst.operands().map(|(l, r)| (l.into(), r.into())),
        };
        self.reserve(&res)?;
        trace!(inst = %inst, dest = %res.dest, "issued");
        Ok(Some(res))
    }

    fn reserve(&mut self, res: &Reservation) -> Result<(), SimError> {
        self.bank.acquire_write(res.dest)?;
        if let Some((lhs, rhs)) = res.reads {
            self.bank.acquire_read(lhs)?;
            self.bank.acquire_read(rhs)?;
        }
        Ok(())
    }

    /// Releases the registers named by `res`. Must be called exactly once
    /// per successful `try_issue`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ReleaseUnderflow` if a counter is already zero.
    pub fn retire(&mut self, res: &Reservation) -> Result<(), SimError> {
        self.bank.release_write(res.dest)?;
        if let Some((lhs, rhs)) = res.reads {
            self.bank.release_read(lhs)?;
            self.bank.release_read(rhs)?;
        }
        Ok(())
    }

    /// Whether no instruction currently holds any register.
    pub fn is_idle(&self) -> bool {
        self.bank.is_idle()
    }
}
