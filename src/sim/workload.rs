use serde::{Deserialize, Serialize};

use crate::core::{ProcessId, Ticks};

/// One process of a scheduling workload. Never mutated by a run; the
/// remaining burst lives in the simulation's own process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    // Lower runs first; only read by the priority policy
    #[serde(default)]
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttEntry {
    pub process_id: ProcessId,
    pub start_time: Ticks,
    pub finish_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStats {
    pub process_id: ProcessId,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    /// Dispatch slices in chronological order.
    pub gantt_chart: Vec<GanttEntry>,
    /// One record per process, in arrival order.
    pub process_stats: Vec<ProcessStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOutcome {
    Hit,
    Fault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReplacementResult<P> {
    pub total_page_faults: usize,
    pub total_page_hits: usize,
    /// Frame contents after each access, `None` for an empty frame.
    pub final_frames_table: Vec<Vec<Option<P>>>,
    pub access_outcomes: Vec<AccessOutcome>,
}
