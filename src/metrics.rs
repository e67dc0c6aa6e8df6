//! Per-process timing metrics and their means.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround (TAT) | completion - arrival |
//! | Waiting (WT) | turnaround - burst |
//! | Response (RT) | first dispatch - arrival |
//! | Completion (CT) | tick the last unit of work finished |

use serde::Serialize;

use crate::core::Ticks;
use crate::sim::FinishedProcess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub waiting: Ticks,
    pub completion: Ticks,
    pub response: Ticks,
    pub turnaround: Ticks,
}

impl ProcessMetrics {
    pub fn of(proc: &FinishedProcess) -> Self {
        let turnaround = proc.completion - proc.arrival;
        Self {
            waiting: turnaround - proc.burst,
            completion: proc.completion,
            response: proc.start - proc.arrival,
            turnaround,
        }
    }
}

/// Arithmetic means over all finished processes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub waiting: f64,
    pub completion: f64,
    pub response: f64,
    pub turnaround: f64,
}

impl Summary {
    /// `None` for an empty run; there is nothing to average.
    pub fn from_finished(finished: &[FinishedProcess]) -> Option<Self> {
        if finished.is_empty() {
            return None;
        }

        // Exact integer totals, divided once. Wide enough that summing
        // tick-sized values cannot overflow.
        let mut totals = [0u128; 4];
        for m in finished.iter().map(ProcessMetrics::of) {
            totals[0] += u128::from(m.waiting);
            totals[1] += u128::from(m.completion);
            totals[2] += u128::from(m.response);
            totals[3] += u128::from(m.turnaround);
        }
        let n = finished.len();
        let mean = |total: u128| total as f64 / n as f64;

        Some(Self {
            count: n,
            waiting: mean(totals[0]),
            completion: mean(totals[1]),
            response: mean(totals[2]),
            turnaround: mean(totals[3]),
        })
    }
}
