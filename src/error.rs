use std::fmt;

use crate::core::Level;

/// Input rejected before a simulation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Queue assignment outside {1, 2, 3}.
    InvalidQueueLevel { label: String, level: i64 },
    /// A burst below 1 can never complete.
    InvalidBurstTime { label: String, burst: i64 },
    InvalidArrivalTime { label: String, arrival: i64 },
    DuplicateLabel { label: String },
    /// Running the workload back to back from its arrivals would take the
    /// clock past the last representable tick.
    TimeOverflow { label: String },
    InvalidQuantum { level: Level },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidQueueLevel { label, level } => {
                write!(f, "process '{label}' has invalid queue level {level} (expected 1, 2 or 3)")
            }
            SimError::InvalidBurstTime { label, burst } => {
                write!(f, "process '{label}' has burst time {burst} (expected at least 1)")
            }
            SimError::InvalidArrivalTime { label, arrival } => {
                write!(f, "process '{label}' has negative arrival time {arrival}")
            }
            SimError::DuplicateLabel { label } => {
                write!(f, "duplicate process label '{label}'")
            }
            SimError::TimeOverflow { label } => {
                write!(f, "process '{label}' would complete past the last representable tick")
            }
            SimError::InvalidQuantum { level } => {
                write!(f, "quantum for level {level} must be at least 1")
            }
        }
    }
}

impl std::error::Error for SimError {}
