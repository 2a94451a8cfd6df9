use serde::{Deserialize, Serialize};

use super::{
    driver::{ReplacementKind, SchedulerKind, replace, schedule},
    workload::{PageReplacementResult, Process, SchedulingResult},
};
use crate::{
    Result,
    core::{PageId, Ticks},
};

/// A scheduling request as it arrives over the wire:
/// `{"algorithm": "RoundRobin", "processes": [...], "timeQuantum": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub algorithm: String,
    pub processes: Vec<Process>,
    #[serde(default)]
    pub time_quantum: Option<Ticks>,
}

impl ScheduleRequest {
    pub fn run(&self) -> Result<SchedulingResult> {
        let kind: SchedulerKind = self.algorithm.parse()?;
        schedule(kind, &self.processes, self.time_quantum)
    }
}

/// `{"algorithm": "LRU", "pages": [7, 0, 1], "size": 3}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRequest {
    pub algorithm: String,
    pub pages: Vec<PageId>,
    pub size: usize,
}

impl ReplaceRequest {
    pub fn run(&self) -> Result<PageReplacementResult<PageId>> {
        let kind: ReplacementKind = self.algorithm.parse()?;
        replace(kind, &self.pages, self.size)
    }
}
