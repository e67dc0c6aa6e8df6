use serde::Serialize;

use crate::core::{Level, ProcId, Ticks};
use crate::scheduler::RequeueReason;

/// Every observable transition of a run, stamped with the tick it happened at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    Admitted {
        at: Ticks,
        pid: ProcId,
        level: Level,
    },
    Dispatched {
        at: Ticks,
        pid: ProcId,
        level: Level,
        first_run: bool,
    },
    // The CPU ran `pid` during [at, at + 1)
    Tick {
        at: Ticks,
        pid: ProcId,
    },
    Completed {
        at: Ticks,
        pid: ProcId,
    },
    Requeued {
        at: Ticks,
        pid: ProcId,
        at_head: bool,
        #[serde(serialize_with = "reason_name")]
        reason: RequeueReason,
    },
    // Nothing ready; time skips to the next arrival
    Idle {
        from: Ticks,
        to: Ticks,
    },
}

impl SchedEvent {
    pub fn pid(&self) -> Option<ProcId> {
        match *self {
            SchedEvent::Admitted { pid, .. }
            | SchedEvent::Dispatched { pid, .. }
            | SchedEvent::Tick { pid, .. }
            | SchedEvent::Completed { pid, .. }
            | SchedEvent::Requeued { pid, .. } => Some(pid),
            SchedEvent::Idle { .. } => None,
        }
    }
}

fn reason_name<S: serde::Serializer>(reason: &RequeueReason, s: S) -> Result<S::Ok, S::Error> {
    match reason {
        RequeueReason::QuantumExpired => s.serialize_str("quantum_expired"),
        RequeueReason::Preempted { by } => s.serialize_str(&format!("preempted_by_level_{by}")),
    }
}
