//! Immutable instruction records.
//!
//! An `Instruction` is a decoded operation: destination register, operator,
//! optional source operands, and the cycle latency fixed by the operator.
//! Records never change after parsing; register renaming produces a separate
//! scheduling-time identity rather than rewriting the record.

use std::fmt;

use serde::Serialize;

use crate::common::reg::ArchReg;

/// The five operations the simulator models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operator {
    /// Integer addition (`+`), 1 cycle.
    Add,
    /// Integer subtraction (`-`), 1 cycle.
    Sub,
    /// Integer multiplication (`*`), 2 cycles.
    Mul,
    /// Memory store, 3 cycles. Takes no source operands.
    Store,
    /// Memory load, 3 cycles. Takes no source operands.
    Load,
}

impl Operator {
    /// Returns the fixed cycle latency for this operator.
    #[inline]
    pub fn latency(self) -> u64 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul => 2,
            Self::Store | Self::Load => 3,
        }
    }

    /// Whether the operator reads source registers.
    ///
    /// Store and Load are modeled without operands, so they never consume
    /// register values and never suffer a RAW hazard as consumers.
    #[inline]
    pub fn reads_operands(self) -> bool {
        !matches!(self, Self::Store | Self::Load)
    }

    /// Returns the textual form of the operator as it appears in programs.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Store => "Store",
            Self::Load => "Load",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A decoded instruction, immutable once parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Destination register.
    pub dest: ArchReg,
    /// Left source operand; `None` for Store/Load.
    pub lhs: Option<ArchReg>,
    /// Operator.
    pub op: Operator,
    /// Right source operand; `None` for Store/Load.
    pub rhs: Option<ArchReg>,
    /// Cycle latency, fixed by the operator at construction.
    latency: u64,
}

impl Instruction {
    /// Creates an arithmetic instruction `dest = lhs op rhs`.
    ///
    /// The latency is taken from the operator and never changes afterwards.
    pub fn arithmetic(dest: ArchReg, lhs: ArchReg, op: Operator, rhs: ArchReg) -> Self {
        Self {
            dest,
            lhs: Some(lhs),
            op,
            rhs: Some(rhs),
            latency: op.latency(),
        }
    }

    /// Creates a memory instruction `dest = Store` or `dest = Load`.
    pub fn memory(dest: ArchReg, op: Operator) -> Self {
        Self {
            dest,
            lhs: None,
            op,
            rhs: None,
            latency: op.latency(),
        }
    }

    /// Returns the instruction's cycle latency.
    #[inline]
    pub fn latency(&self) -> u64 {
        self.latency
    }

    /// Returns both source operands, or `None` for Store/Load.
    #[inline]
    pub fn operands(&self) -> Option<(ArchReg, ArchReg)> {
        self.lhs.zip(self.rhs)
    }
}

impl fmt::Display for Instruction {
    /// Renders the instruction in the textual program format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operands() {
            Some((lhs, rhs)) => write!(f, "{} = {} {} {}", self.dest, lhs, self.op, rhs),
            None => write!(f, "{} = {}", self.dest, self.op),
        }
    }
}
