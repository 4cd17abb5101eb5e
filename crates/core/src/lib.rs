//! Issue/retire pipeline simulator library.
//!
//! This crate models how a short RISC-style instruction stream is issued and
//! retired under three execution disciplines. It provides:
//! 1. **ISA:** Immutable instruction records and the textual instruction parser.
//! 2. **Scheduling:** A per-register occupancy scoreboard that gates issue on
//!    RAW/WAR/WAW hazards, with an optional shadow-bank register renamer.
//! 3. **Engine:** A cycle-stepping state machine for single-issue, superscalar
//!    in-order, and superscalar out-of-order execution.
//! 4. **Simulation:** Program loading, configuration, per-cycle tracing, and
//!    run statistics.

/// Common types (register identifiers, error taxonomy).
pub mod common;
/// Simulator configuration (defaults, discipline selection, validation).
pub mod config;
/// Execution engine (cycle loop, issue disciplines, trace records).
pub mod engine;
/// Instruction set (operators, instruction records, textual parsing).
pub mod isa;
/// Hazard scheduling (occupancy scoreboard, register renaming).
pub mod sched;
/// Program file loading.
pub mod sim;
/// Run statistics derived from a trace.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level error type shared by every fallible operation in the crate.
pub use crate::common::error::SimError;
/// Cycle-stepping execution engine; construct with `Engine::new`.
pub use crate::engine::Engine;
/// Per-cycle simulation trace; produced by `Engine::run`.
pub use crate::engine::trace::Trace;
