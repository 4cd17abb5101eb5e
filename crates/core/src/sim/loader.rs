//! Program file loader.
//!
//! Reads a textual program and parses it into instruction records. A parse
//! failure anywhere aborts the load; there is no partial-load recovery.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::SimError;
use crate::isa::instruction::Instruction;
use crate::isa::parse::parse_program;

/// Loads and parses a program file, one instruction per non-blank line.
///
/// # Errors
///
/// Returns `SimError::Io` if the file cannot be read and
/// `SimError::MalformedInstruction` for the first bad line.
pub fn load_program(path: &Path) -> Result<Vec<Instruction>, SimError> {
    let text = fs::read_to_string(path)?;
    let program = parse_program(&text)?;
    debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}
