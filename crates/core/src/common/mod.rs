//! Common types shared throughout the pipeline simulator.
//!
//! This module provides the fundamental building blocks used by every other
//! component. It includes:
//! 1. **Register Identifiers:** Strong types for architectural and physical
//!    (architectural-or-shadow) register names.
//! 2. **Error Handling:** The simulator-wide error taxonomy.

/// Error type definitions.
pub mod error;

/// Register identifier types.
pub mod reg;

pub use error::SimError;
pub use reg::{ArchReg, PhysReg};
