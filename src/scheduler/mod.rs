pub mod mlq;

use crate::core::{
    Ticks,
    state::{Level, MlqCtx, ProcId, QueueEnd},
};
pub use mlq::{MlqScheduler, Quanta};

pub const DEFAULT_LEVEL1_QUANTUM: Ticks = 3;
pub const DEFAULT_LEVEL2_QUANTUM: Ticks = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequeueReason {
    QuantumExpired,
    // A strictly higher level has work waiting
    Preempted { by: Level },
}

/// What happens to the running process after a tick in which it did not finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Continue,
    Requeue { end: QueueEnd, reason: RequeueReason },
}

pub trait Scheduler {
    /// Removes the next process to dispatch from the ready set.
    fn pick_next(&mut self, ctx: &mut MlqCtx) -> Option<ProcId>;

    /// Called once admissions for the new tick are done.
    fn after_tick(&mut self, ctx: &MlqCtx, pid: ProcId) -> TickDecision;

    /// Longest run `level` may get between dispatch decisions, if bounded.
    fn quantum(&self, _level: Level) -> Option<Ticks> {
        None
    }
}
