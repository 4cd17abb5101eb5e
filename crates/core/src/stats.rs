//! Run statistics derived from a trace.
//!
//! Summarizes a completed run: cycle count, retired instruction count, and
//! derived throughput. Computed after the fact from the trace so the engine
//! itself stays free of bookkeeping.

use std::fmt;

use crate::engine::trace::Trace;

/// Summary statistics for one completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Total instructions retired.
    pub retired: u64,
}

impl RunStats {
    /// Computes statistics from a completed trace.
    pub fn from_trace(full: &Trace) -> Self {
        Self {
            cycles: full.cycles(),
            retired: full.retired_count() as u64,
        }
    }

    /// Instructions retired per cycle; 0.0 for an empty run.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.retired as f64 / self.cycles as f64
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instructions in {} cycles (IPC {:.2})",
            self.retired,
            self.cycles,
            self.ipc()
        )
    }
}
