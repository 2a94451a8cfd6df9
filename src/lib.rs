//! Deterministic models of classical OS resource allocation: four CPU
//! scheduling policies (FCFS, SJF, priority, round-robin) and four page
//! replacement policies (FIFO, optimal, LRU, LFU).
//!
//! Each run is a pure function of its input. Pick a policy with
//! [`SchedulerKind`] or [`ReplacementKind`] and call [`schedule`] or
//! [`replace`], or drive a concrete policy type through
//! [`run_scheduler`] / [`run_policy`].

pub mod core;
pub mod error;
pub mod paging;
pub mod scheduler;
pub mod sim;

pub use error::{Result, SimError};
pub use paging::ReplacementPolicy;
pub use scheduler::Scheduler;
pub use sim::{
    PageReplacementResult, Process, ReplaceRequest, ReplacementKind, ScheduleRequest,
    SchedulerKind, SchedulingResult, replace, run_policy, run_scheduler, schedule,
};
