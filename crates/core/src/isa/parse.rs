//! Textual instruction parsing.
//!
//! Accepted grammar, one instruction per line:
//!
//! ```text
//! DEST = Store
//! DEST = Load
//! DEST = LEFT OP RIGHT      OP ∈ { +, -, * }
//! ```
//!
//! Registers are architectural names `R<n>`. Blank lines are skipped. Any
//! other shape is a `SimError::MalformedInstruction` and aborts the load;
//! there is no partial-load recovery.

use crate::common::error::SimError;
use crate::common::reg::ArchReg;
use crate::isa::instruction::{Instruction, Operator};

/// Parses a whole program, one instruction per non-blank line.
///
/// # Errors
///
/// Returns the first `SimError::MalformedInstruction` encountered; line
/// numbers are 1-based and count blank lines.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, SimError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// Parses a single instruction line.
///
/// # Errors
///
/// Returns `SimError::MalformedInstruction` for anything outside the
/// grammar: missing `=`, an unknown operator, or a bad register name.
pub fn parse_line(line: &str, line_no: usize) -> Result<Instruction, SimError> {
    let malformed = |reason: String| SimError::MalformedInstruction {
        line: line_no,
        reason,
    };

    let (dest, expr) = line
        .split_once('=')
        .ok_or_else(|| malformed(format!("expected 'DEST = ...', got '{}'", line.trim())))?;

    let dest: ArchReg = dest.trim().parse().map_err(malformed)?;
    let expr = expr.trim();

    match expr {
        "Store" => return Ok(Instruction::memory(dest, Operator::Store)),
        "Load" => return Ok(Instruction::memory(dest, Operator::Load)),
        _ => {}
    }

    let mut tokens = expr.split_whitespace();
    let (lhs, op, rhs) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(lhs), Some(op), Some(rhs), None) => (lhs, op, rhs),
        _ => {
            return Err(malformed(format!(
                "expected 'LEFT OP RIGHT', got '{expr}'"
            )));
        }
    };

    let op = match op {
        "+" => Operator::Add,
        "-" => Operator::Sub,
        "*" => Operator::Mul,
        other => return Err(malformed(format!("unknown operator '{other}'"))),
    };

    let lhs: ArchReg = lhs.parse().map_err(malformed)?;
    let rhs: ArchReg = rhs.parse().map_err(malformed)?;
    Ok(Instruction::arithmetic(dest, lhs, op, rhs))
}
