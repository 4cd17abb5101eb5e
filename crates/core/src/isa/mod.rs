//! Instruction set: operators, instruction records, and textual parsing.
//!
//! This module defines everything the simulator knows about the program
//! being scheduled. It includes:
//! 1. **Operators:** The five operations and their fixed cycle latencies.
//! 2. **Instruction Records:** Immutable decoded instructions (destination,
//!    optional operands, operator, latency).
//! 3. **Parsing:** The textual grammar `DEST = Store`, `DEST = Load`, and
//!    `DEST = LEFT OP RIGHT`.

/// Instruction record and operator definitions.
pub mod instruction;

/// Textual instruction parsing.
pub mod parse;

pub use instruction::{Instruction, Operator};
pub use parse::{parse_line, parse_program};
