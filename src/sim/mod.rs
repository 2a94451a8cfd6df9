pub mod driver;
pub mod request;
pub mod workload;

pub use driver::{ReplacementKind, SchedulerKind, replace, run_policy, run_scheduler, schedule};
pub use request::{ReplaceRequest, ScheduleRequest};
pub use workload::{
    AccessOutcome, GanttEntry, PageReplacementResult, Process, ProcessStats, SchedulingResult,
};
