//! Architectural and physical register identifier types.
//!
//! This module defines strong types for register names to prevent accidental
//! mixing of the two register namespaces. It provides:
//! 1. **Type Safety:** Architectural names (`R<n>`) as parsed from program
//!    text, distinct from the physical identity a reservation actually holds.
//! 2. **Shadow Registers:** Each architectural register owns exactly one
//!    shadow register (`S<n>`) used by the renamer to absorb WAR/WAW hazards.
//! 3. **Rendering:** `Display` implementations matching the textual program
//!    format, used by trace output and diagnostics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// An architectural register name as written in program text (`R0`, `R1`, ...).
///
/// Instructions only ever name architectural registers; shadow registers are a
/// scheduling-time identity and never appear in parsed programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ArchReg(pub u8);

/// A physical register identity: either an architectural register or its
/// dedicated shadow register.
///
/// Reservations hold `PhysReg` so that a renamed instruction frees the shadow
/// register it actually occupied, not the architectural one it was parsed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PhysReg {
    /// An architectural register (`R<n>`).
    Arch(u8),
    /// The shadow register paired 1:1 with architectural register `n` (`S<n>`).
    Shadow(u8),
}

impl ArchReg {
    /// Returns the register index.
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Returns the shadow register paired with this architectural register.
    #[inline]
    pub fn shadow(self) -> PhysReg {
        PhysReg::Shadow(self.0)
    }
}

impl PhysReg {
    /// Returns the register index within its bank.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Self::Arch(n) | Self::Shadow(n) => n,
        }
    }
}

impl From<ArchReg> for PhysReg {
    fn from(reg: ArchReg) -> Self {
        Self::Arch(reg.0)
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arch(n) => write!(f, "R{n}"),
            Self::Shadow(n) => write!(f, "S{n}"),
        }
    }
}

impl FromStr for ArchReg {
    type Err = String;

    /// Parses an architectural register name of the form `R<n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('R')
            .ok_or_else(|| format!("register name must start with 'R': '{s}'"))?;
        let index: u8 = digits
            .parse()
            .map_err(|_| format!("invalid register index: '{s}'"))?;
        Ok(Self(index))
    }
}
