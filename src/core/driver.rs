use super::{
    event::SchedEvent,
    observer::Observer,
    state::{MlqCtx, ProcId, QueueEnd, Ticks},
};
use crate::scheduler::{Scheduler, TickDecision};

/// Owns the CPU: dispatch, one tick of execution, and what happens right after.
///
/// Arrivals are not this type's concern; the caller admits them between
/// [`SchedCore::run_tick`] and [`SchedCore::settle`] so that the requeue rules
/// see the ready set as of the new tick.
pub struct SchedCore<S: Scheduler> {
    pub ctx: MlqCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: MlqCtx::new(),
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Selection step. Returns `false` if the CPU is idle and nothing is ready.
    pub fn dispatch(&mut self, events: &mut Vec<SchedEvent>) -> bool {
        if !self.ctx.cpu_is_idle() {
            return true;
        }

        let Some(pid) = self.scheduler.pick_next(&mut self.ctx) else {
            return false;
        };
        self.ctx.set_running(pid);

        let proc = self.ctx.proc(pid);
        events.push(SchedEvent::Dispatched {
            at: self.ctx.now,
            pid,
            level: proc.level,
            first_run: proc.start.is_none(),
        });
        true
    }

    /// Consumes one unit of CPU time for the running process.
    pub fn run_tick(&mut self, events: &mut Vec<SchedEvent>) {
        let pid = self.ctx.current.expect("run_tick() called with an idle CPU");
        let now = self.ctx.now;

        // In its own block to end the mutable borrow of the process
        {
            let proc = self.ctx.proc_mut(pid);
            debug_assert!(proc.remaining > 0, "{} running with no work left", proc.label);
            proc.start.get_or_insert(now);
            proc.remaining -= 1;
        }
        self.ctx.quantum_used += 1;
        self.ctx.advance_time(1);

        events.push(SchedEvent::Tick { at: now, pid });
    }

    /// Completion check, then the scheduler's requeue rule.
    ///
    /// Returns the process that finished during this tick, if any.
    pub fn settle(&mut self, events: &mut Vec<SchedEvent>) -> Option<ProcId> {
        let pid = self.ctx.current?;
        let now = self.ctx.now;

        if self.ctx.proc(pid).remaining == 0 {
            self.ctx.complete_current();
            events.push(SchedEvent::Completed { at: now, pid });
            return Some(pid);
        }

        if let TickDecision::Requeue { end, reason } = self.scheduler.after_tick(&self.ctx, pid) {
            self.ctx.requeue_current(end);
            events.push(SchedEvent::Requeued {
                at: now,
                pid,
                at_head: end == QueueEnd::Head,
                reason,
            });
        }

        None
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx, &self.scheduler);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
