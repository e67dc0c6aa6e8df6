use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{Level, ProcState, Process, Ticks};

/// One input record: `label;burst;arrival;queue;priority`.
///
/// Numbers are kept raw here, signs included; they are checked against the
/// three levels and converted to ticks when a simulation is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub label: String,
    pub burst: i64,
    pub arrival: i64,
    pub queue: i64,
    pub priority: i64,
}

impl ProcessSpec {
    pub fn new(
        label: impl Into<String>,
        burst: i64,
        arrival: i64,
        queue: i64,
        priority: i64,
    ) -> Self {
        Self {
            label: label.into(),
            burst,
            arrival,
            queue,
            priority,
        }
    }
}

/// Arrival ascending, then priority descending, then label ascending.
///
/// Only decides the order among processes arriving at the same tick.
pub fn admission_order(a: &ProcessSpec, b: &ProcessSpec) -> Ordering {
    a.arrival
        .cmp(&b.arrival)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| a.label.cmp(&b.label))
}

/// A process that ran to completion. Both timestamps are always known here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishedProcess {
    pub label: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    #[serde(rename = "queue")]
    pub level: Level,
    pub priority: i64,
    pub start: Ticks,
    pub completion: Ticks,
}

impl FinishedProcess {
    /// `None` unless `proc` has finished.
    pub fn from_process(proc: &Process) -> Option<Self> {
        if proc.state != ProcState::Finished {
            return None;
        }
        let (start, completion) = proc.start.zip(proc.completion)?;
        Some(Self {
            label: proc.label.clone(),
            burst: proc.burst,
            arrival: proc.arrival,
            level: proc.level,
            priority: proc.priority,
            start,
            completion,
        })
    }
}
