//! Program loading.
//!
//! This module turns program files into instruction streams. It includes:
//! 1. **Loader:** Reads a program file and parses every non-blank line.

/// Program file loader.
pub mod loader;

pub use loader::load_program;
