//! Occupancy scoreboard with shadow-bank register renaming.
//!
//! Extends the plain scoreboard with a second register bank: every
//! architectural register `R<n>` owns exactly one shadow register `S<n>`.
//! When an instruction is blocked by a WAR or WAW hazard (never RAW, which
//! is a genuine data dependency), the hazard check is re-run with the shadow
//! register as destination; if the shadow is free, the instruction issues
//! with its write redirected there for the rest of its lifetime.
//!
//! Because the mapping is fixed 1:1 rather than a free pool, a second
//! WAR/WAW hazard on the same architectural register while its shadow is
//! still occupied cannot be renamed and stalls. True hardware renaming with
//! pooled shadow registers would avoid that stall; this model deliberately
//! keeps it.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::common::reg::{ArchReg, PhysReg};
use crate::isa::instruction::Instruction;
use crate::sched::scoreboard::Bank;
use crate::sched::{Hazard, Reservation};

/// Occupancy scoreboard with a shadow register bank.
#[derive(Debug)]
pub struct RenameScoreboard {
    arch: Bank,
    shadow: Bank,
}

impl RenameScoreboard {
    /// Creates a scoreboard with `arch_registers` architectural registers
    /// and one shadow register per architectural register, all idle.
    pub fn new(arch_registers: usize) -> Self {
        Self {
            arch: Bank::new(arch_registers),
            shadow: Bank::new(arch_registers),
        }
    }

    fn writers(&self, reg: PhysReg) -> Result<u32, SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.writers(reg),
            PhysReg::Shadow(_) => self.shadow.writers(reg),
        }
    }

    fn readers(&self, reg: PhysReg) -> Result<u32, SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.readers(reg),
            PhysReg::Shadow(_) => self.shadow.readers(reg),
        }
    }

    fn acquire_write(&mut self, reg: PhysReg) -> Result<(), SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.acquire_write(reg),
            PhysReg::Shadow(_) => self.shadow.acquire_write(reg),
        }
    }

    fn acquire_read(&mut self, reg: PhysReg) -> Result<(), SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.acquire_read(reg),
            PhysReg::Shadow(_) => self.shadow.acquire_read(reg),
        }
    }

    fn release_write(&mut self, reg: PhysReg) -> Result<(), SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.release_write(reg),
            PhysReg::Shadow(_) => self.shadow.release_write(reg),
        }
    }

    fn release_read(&mut self, reg: PhysReg) -> Result<(), SimError> {
        match reg {
            PhysReg::Arch(_) => self.arch.release_read(reg),
            PhysReg::Shadow(_) => self.shadow.release_read(reg),
        }
    }

    /// Redirects each source operand to its shadow register when that shadow
    /// is the authoritative producer (exactly one pending writer).
    ///
    /// This lets consumers track a renamed value instead of the stale
    /// architectural register: the RAW check then stalls on the shadow's
    /// producer, which is the instruction that actually computes the value.
    pub fn rename_sources(
        &self,
        inst: &Instruction,
    ) -> Result<Option<(PhysReg, PhysReg)>, SimError> {
        let Some((lhs, rhs)) = inst.operands() else {
            return Ok(None);
        };
        let resolve = |reg: ArchReg| -> Result<PhysReg, SimError> {
            let shadow = reg.shadow();
            if self.shadow.writers(shadow)? == 1 {
                Ok(shadow)
            } else {
                Ok(reg.into())
            }
        };
        Ok(Some((resolve(lhs)?, resolve(rhs)?)))
    }

    /// Hazard classification against an explicit destination and operand set.
    ///
    /// Same precedence as the plain scoreboard: RAW first, then WAR, then
    /// WAW, all against the physical registers the instruction would occupy.
    fn classify_with(
        &self,
        reads: Option<(PhysReg, PhysReg)>,
        dest: PhysReg,
    ) -> Result<Option<Hazard>, SimError> {
        if let Some((lhs, rhs)) = reads {
            if self.writers(lhs)? > 0 || self.writers(rhs)? > 0 {
                return Ok(Some(Hazard::ReadAfterWrite));
            }
        }
        if self.readers(dest)? != 0 {
            return Ok(Some(Hazard::WriteAfterRead));
        }
        if self.writers(dest)? != 0 {
            return Ok(Some(Hazard::WriteAfterWrite));
        }
        Ok(None)
    }

    /// Checks `inst` for hazards, renaming the destination to its shadow
    /// register when that eliminates a WAR/WAW hazard.
    ///
    /// A failed rename attempt leaves no state behind: the instruction stays
    /// blocked with its architectural destination untouched.
    pub fn try_issue(&mut self, inst: &Instruction) -> Result<Option<Reservation>, SimError> {
        let reads = self.rename_sources(inst)?;
        let arch_dest = PhysReg::from(inst.dest);

        match self.classify_with(reads, arch_dest)? {
            None => {
                let res = Reservation {
                    dest: arch_dest,
                    reads,
                };
                self.reserve(&res)?;
                trace!(inst = %inst, dest = %res.dest, "issued");
                Ok(Some(res))
            }
            Some(Hazard::ReadAfterWrite) => {
                debug!(hazard = %Hazard::ReadAfterWrite, inst = %inst, "issue blocked");
                Ok(None)
            }
            Some(hazard) => {
                let shadow = inst.dest.shadow();
                if self.classify_with(reads, shadow)?.is_none() {
                    let res = Reservation {
                        dest: shadow,
                        reads,
                    };
                    self.reserve(&res)?;
                    debug!(%hazard, inst = %inst, dest = %shadow, "renamed destination");
                    Ok(Some(res))
                } else {
                    // Fixed 1:1 mapping: the shadow is still occupied, so
                    // this hazard cannot be renamed away and must stall.
                    debug!(%hazard, inst = %inst, "issue blocked, shadow busy");
                    Ok(None)
                }
            }
        }
    }

    fn reserve(&mut self, res: &Reservation) -> Result<(), SimError> {
        self.acquire_write(res.dest)?;
        if let Some((lhs, rhs)) = res.reads {
            self.acquire_read(lhs)?;
            self.acquire_read(rhs)?;
        }
        Ok(())
    }

    /// Releases the registers named by `res`, shadow or architectural.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ReleaseUnderflow` if a counter is already zero.
    pub fn retire(&mut self, res: &Reservation) -> Result<(), SimError> {
        self.release_write(res.dest)?;
        if let Some((lhs, rhs)) = res.reads {
            self.release_read(lhs)?;
            self.release_read(rhs)?;
        }
        Ok(())
    }

    /// Whether no instruction currently holds any register in either bank.
    pub fn is_idle(&self) -> bool {
        self.arch.is_idle() && self.shadow.is_idle()
    }
}
