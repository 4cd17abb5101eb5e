//! Cycle-stepping execution engine.
//!
//! The engine drives the cycle loop for one of three issue disciplines,
//! consulting the scheduler for readiness and owning the in-flight set. It
//! provides:
//! 1. **State Machine:** `NotStarted → Running → Drained`; one cycle per
//!    `step`, deterministic for any finite program.
//! 2. **Issue Policies:** Single-issue with a post-retirement bubble,
//!    in-order superscalar, and out-of-order superscalar with a deferred set.
//! 3. **Retirement:** Latency-based deadlines, released through the
//!    scheduler; in program order for the in-order disciplines, unordered
//!    for out-of-order.
//! 4. **Tracing:** One `CycleRecord` per cycle with issued and retired
//!    instructions.
//!
//! Each cycle retires first, then issues: registers freed by a retirement
//! are visible to the same cycle's issue checks (except under single-issue,
//! where a retirement cycle deliberately never issues).

use std::collections::{BTreeMap, BTreeSet};

use crate::common::error::SimError;
use crate::config::{Config, Discipline};
use crate::isa::instruction::Instruction;
use crate::sched::{Reservation, Scheduler};

/// Per-cycle trace records.
pub mod trace;

pub use self::trace::{CycleRecord, IssueRecord, Trace};

use self::trace::render_issue;

/// Lifecycle of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed; no cycle has run.
    NotStarted,
    /// At least one cycle has run and work remains.
    Running,
    /// No unissued, in-flight, or deferred instructions remain.
    Drained,
}

/// An issued instruction awaiting retirement.
#[derive(Debug)]
struct InFlight {
    /// Cycle at which the instruction's latency has elapsed.
    deadline: u64,
    /// Registers held until retirement.
    res: Reservation,
}

/// Cycle-stepping issue/retire engine over one instruction stream.
#[derive(Debug)]
pub struct Engine {
    program: Vec<Instruction>,
    scheduler: Scheduler,
    discipline: Discipline,
    issue_slots: usize,
    state: EngineState,
    cycle: u64,
    /// Index of the next never-issued instruction.
    next_fetch: usize,
    /// Issued instructions by program index, with deadline and reservation.
    in_flight: BTreeMap<usize, InFlight>,
    /// Out-of-order only: blocked instructions parked for retry.
    deferred: BTreeSet<usize>,
}

impl Engine {
    /// Creates an engine for `program` under the given configuration.
    ///
    /// The discipline and scheduler variant are chosen here, once; the cycle
    /// loop never re-inspects the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config.validate()` fails.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            program,
            scheduler: Scheduler::from_config(config),
            discipline: config.discipline,
            issue_slots: config.issue_slots,
            state: EngineState::NotStarted,
            cycle: 0,
            next_fetch: 0,
            in_flight: BTreeMap::new(),
            deferred: BTreeSet::new(),
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current cycle number (0 before the first step).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether any instruction remains unissued, in flight, or deferred.
    fn pending(&self) -> bool {
        self.next_fetch < self.program.len()
            || !self.in_flight.is_empty()
            || !self.deferred.is_empty()
    }

    /// Advances the simulation by one cycle.
    ///
    /// Returns the cycle's record, or `None` once the engine is drained. An
    /// empty program drains on the first call without emitting a record.
    ///
    /// # Errors
    ///
    /// Propagates scheduler invariant violations; these are fatal and leave
    /// the engine unusable.
    pub fn step(&mut self) -> Result<Option<CycleRecord>, SimError> {
        if self.state == EngineState::Drained || !self.pending() {
            self.state = EngineState::Drained;
            return Ok(None);
        }
        self.state = EngineState::Running;
        self.cycle += 1;

        let retired = self.retire_phase()?;
        let issued = match self.discipline {
            Discipline::SingleIssue => self.issue_single(retired.is_empty())?,
            Discipline::SuperscalarInOrder => self.issue_in_order()?,
            Discipline::SuperscalarOutOfOrder => self.issue_out_of_order()?,
        };

        if !self.pending() {
            self.state = EngineState::Drained;
        }
        Ok(Some(CycleRecord {
            cycle: self.cycle,
            issued,
            retired,
        }))
    }

    /// Runs the engine to `Drained`, collecting the full trace.
    ///
    /// # Errors
    ///
    /// Propagates the first error from `step`.
    pub fn run(&mut self) -> Result<Trace, SimError> {
        let mut full = Trace::default();
        while let Some(record) = self.step()? {
            full.records.push(record);
        }
        Ok(full)
    }

    /// Retires every eligible in-flight instruction and frees its registers.
    ///
    /// In-order disciplines retire in ascending program index: if the lowest
    /// pending instruction's deadline has not arrived, nothing retires this
    /// cycle, even when a higher-indexed deadline has. Out-of-order retires
    /// whatever has expired, in index order only for determinism.
    fn retire_phase(&mut self) -> Result<Vec<usize>, SimError> {
        let mut retired = Vec::new();
        match self.discipline {
            Discipline::SingleIssue | Discipline::SuperscalarInOrder => {
                while let Some((&idx, flight)) = self.in_flight.first_key_value() {
                    if flight.deadline > self.cycle {
                        break;
                    }
                    self.retire_one(idx, &mut retired)?;
                }
            }
            Discipline::SuperscalarOutOfOrder => {
                let expired: Vec<usize> = self
                    .in_flight
                    .iter()
                    .filter(|(_, flight)| flight.deadline <= self.cycle)
                    .map(|(&idx, _)| idx)
                    .collect();
                for idx in expired {
                    self.retire_one(idx, &mut retired)?;
                }
            }
        }
        Ok(retired)
    }

    fn retire_one(&mut self, idx: usize, retired: &mut Vec<usize>) -> Result<(), SimError> {
        if let Some(flight) = self.in_flight.remove(&idx) {
            self.scheduler.retire(&flight.res)?;
            tracing::trace!(cycle = self.cycle, index = idx + 1, "retire");
            retired.push(idx + 1);
        }
        Ok(())
    }

    /// Single-issue policy: one instruction in flight, and a retirement
    /// cycle never issues. The one-cycle bubble after each retirement is
    /// deliberate, reproducible behavior.
    fn issue_single(&mut self, may_issue: bool) -> Result<Vec<IssueRecord>, SimError> {
        if !may_issue || !self.in_flight.is_empty() || self.next_fetch >= self.program.len() {
            return Ok(Vec::new());
        }
        let idx = self.next_fetch;
        let inst = self.program[idx];
        // Nothing is in flight, so every register is free and the check
        // cannot block; it still runs so the reservation is recorded.
        match self.scheduler.try_issue(&inst)? {
            Some(res) => {
                self.next_fetch += 1;
                Ok(vec![self.admit(idx, &inst, res)])
            }
            None => Ok(Vec::new()),
        }
    }

    /// In-order superscalar policy: offer up to `issue_slots` candidates in
    /// program order, ending the cycle's issue phase at the first one that
    /// is not ready. In-order issue never skips ahead.
    fn issue_in_order(&mut self) -> Result<Vec<IssueRecord>, SimError> {
        let mut issued = Vec::new();
        for _ in 0..self.issue_slots {
            if self.next_fetch >= self.program.len() {
                break;
            }
            let idx = self.next_fetch;
            let inst = self.program[idx];
            match self.scheduler.try_issue(&inst)? {
                Some(res) => {
                    self.next_fetch += 1;
                    issued.push(self.admit(idx, &inst, res));
                }
                None => break,
            }
        }
        Ok(issued)
    }

    /// Out-of-order superscalar policy: deferred instructions are retried in
    /// ascending program index before any new instruction is considered. A
    /// still-blocked instruction consumes no slot, so independent work can
    /// use the remaining slots the same cycle.
    fn issue_out_of_order(&mut self) -> Result<Vec<IssueRecord>, SimError> {
        let mut issued = Vec::new();
        let mut slots = self.issue_slots;

        let parked: Vec<usize> = self.deferred.iter().copied().collect();
        for idx in parked {
            if slots == 0 {
                break;
            }
            let inst = self.program[idx];
            if let Some(res) = self.scheduler.try_issue(&inst)? {
                self.deferred.remove(&idx);
                issued.push(self.admit(idx, &inst, res));
                slots -= 1;
            }
        }

        while slots > 0 && self.next_fetch < self.program.len() {
            let idx = self.next_fetch;
            self.next_fetch += 1;
            let inst = self.program[idx];
            if let Some(res) = self.scheduler.try_issue(&inst)? {
                issued.push(self.admit(idx, &inst, res));
                slots -= 1;
            } else {
                self.deferred.insert(idx);
            }
        }
        Ok(issued)
    }

    /// Records an admitted instruction: deadline, in-flight entry, and the
    /// issue record for the trace.
    fn admit(&mut self, idx: usize, inst: &Instruction, res: Reservation) -> IssueRecord {
        let deadline = self.cycle + inst.latency();
        tracing::trace!(cycle = self.cycle, index = idx + 1, deadline, "issue");
        self.in_flight.insert(idx, InFlight { deadline, res });
        IssueRecord {
            index: idx + 1,
            text: render_issue(inst, &res),
        }
    }
}
