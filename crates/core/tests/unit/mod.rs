//! Scenario and property tests.


/// Superscalar out-of-order discipline.
pub mod out_of_order;

/// Stream-level properties across all disciplines.
pub mod properties;

/// Register renaming behavior through the engine.
pub mod renaming;

/// Single-issue discipline.
pub mod single_issue;
