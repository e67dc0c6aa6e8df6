use super::{
    DEFAULT_LEVEL1_QUANTUM, DEFAULT_LEVEL2_QUANTUM, RequeueReason, Scheduler, TickDecision,
};
use crate::{
    core::{
        Ticks,
        state::{Level, MlqCtx, ProcId, QueueEnd},
    },
    error::SimError,
};

/// Round-robin quanta for the two upper levels. Level 3 has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quanta {
    pub level1: Ticks,
    pub level2: Ticks,
}

impl Quanta {
    pub fn new(level1: Ticks, level2: Ticks) -> Result<Self, SimError> {
        for (level, quantum) in [(Level::One, level1), (Level::Two, level2)] {
            if quantum == 0 {
                return Err(SimError::InvalidQuantum { level });
            }
        }
        Ok(Self { level1, level2 })
    }
}

impl Default for Quanta {
    fn default() -> Self {
        Self {
            level1: DEFAULT_LEVEL1_QUANTUM,
            level2: DEFAULT_LEVEL2_QUANTUM,
        }
    }
}

/// Fixed three-level queue policy.
///
/// Level 1 is round-robin, level 2 is round-robin but yields to level 1
/// immediately, level 3 is FCFS and yields to either upper level, going back
/// to the head of its queue so it resumes before its peers.
#[derive(Debug, Clone, Default)]
pub struct MlqScheduler {
    quanta: Quanta,
}

impl MlqScheduler {
    pub fn new(quanta: Quanta) -> Self {
        Self { quanta }
    }

    pub fn quanta(&self) -> Quanta {
        self.quanta
    }

    fn preempting_level(ctx: &MlqCtx, level: Level) -> Option<Level> {
        level
            .higher()
            .iter()
            .copied()
            .find(|&higher| !ctx.ready.is_empty(higher))
    }
}

impl Scheduler for MlqScheduler {
    fn pick_next(&mut self, ctx: &mut MlqCtx) -> Option<ProcId> {
        let level = ctx.ready.first_non_empty()?;
        ctx.ready.pop_front(level)
    }

    fn after_tick(&mut self, ctx: &MlqCtx, pid: ProcId) -> TickDecision {
        let level = ctx.proc(pid).level;
        let used = ctx.quantum_used;

        match level {
            Level::One => {
                if used >= self.quanta.level1 {
                    return TickDecision::Requeue {
                        end: QueueEnd::Tail,
                        reason: RequeueReason::QuantumExpired,
                    };
                }
            }
            Level::Two => {
                if let Some(by) = Self::preempting_level(ctx, level) {
                    return TickDecision::Requeue {
                        end: QueueEnd::Tail,
                        reason: RequeueReason::Preempted { by },
                    };
                }
                if used >= self.quanta.level2 {
                    return TickDecision::Requeue {
                        end: QueueEnd::Tail,
                        reason: RequeueReason::QuantumExpired,
                    };
                }
            }
            Level::Three => {
                if let Some(by) = Self::preempting_level(ctx, level) {
                    return TickDecision::Requeue {
                        end: QueueEnd::Head,
                        reason: RequeueReason::Preempted { by },
                    };
                }
            }
        }

        TickDecision::Continue
    }

    fn quantum(&self, level: Level) -> Option<Ticks> {
        match level {
            Level::One => Some(self.quanta.level1),
            Level::Two => Some(self.quanta.level2),
            Level::Three => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(levels: &[Level]) -> MlqCtx {
        let mut ctx = MlqCtx::new();
        for (i, &level) in levels.iter().enumerate() {
            let pid = ctx.create_process(format!("P{i}"), 10, 0, level, 0);
            ctx.admit(pid);
        }
        ctx
    }

    fn run_first(ctx: &mut MlqCtx, sched: &mut MlqScheduler, ticks: Ticks) -> ProcId {
        let pid = sched.pick_next(ctx).unwrap();
        ctx.set_running(pid);
        ctx.quantum_used = ticks;
        pid
    }

    #[test]
    fn test_quanta_reject_zero() {
        assert_eq!(
            Quanta::new(0, 5),
            Err(SimError::InvalidQuantum { level: Level::One })
        );
        assert_eq!(
            Quanta::new(3, 0),
            Err(SimError::InvalidQuantum { level: Level::Two })
        );
        assert_eq!(Quanta::new(3, 5), Ok(Quanta::default()));
    }

    #[test]
    fn test_pick_scans_levels_in_order() {
        let mut ctx = ctx_with(&[Level::Three, Level::Two, Level::One, Level::One]);
        let mut sched = MlqScheduler::default();
        assert_eq!(sched.pick_next(&mut ctx), Some(2));
        assert_eq!(sched.pick_next(&mut ctx), Some(3));
        assert_eq!(sched.pick_next(&mut ctx), Some(1));
        assert_eq!(sched.pick_next(&mut ctx), Some(0));
        assert_eq!(sched.pick_next(&mut ctx), None);
    }

    #[test]
    fn test_level1_round_robin() {
        let mut ctx = ctx_with(&[Level::One]);
        let mut sched = MlqScheduler::default();
        let pid = run_first(&mut ctx, &mut sched, 2);
        assert_eq!(sched.after_tick(&ctx, pid), TickDecision::Continue);
        ctx.quantum_used = 3;
        assert_eq!(
            sched.after_tick(&ctx, pid),
            TickDecision::Requeue {
                end: QueueEnd::Tail,
                reason: RequeueReason::QuantumExpired
            }
        );
    }

    #[test]
    fn test_level2_yields_to_level1() {
        let mut ctx = ctx_with(&[Level::Two]);
        let mut sched = MlqScheduler::default();
        let pid = run_first(&mut ctx, &mut sched, 1);
        assert_eq!(sched.after_tick(&ctx, pid), TickDecision::Continue);

        let l1 = ctx.create_process("L1".into(), 1, 0, Level::One, 0);
        ctx.admit(l1);
        assert_eq!(
            sched.after_tick(&ctx, pid),
            TickDecision::Requeue {
                end: QueueEnd::Tail,
                reason: RequeueReason::Preempted { by: Level::One }
            }
        );
    }

    #[test]
    fn test_level2_quantum() {
        let mut ctx = ctx_with(&[Level::Two, Level::Three]);
        let mut sched = MlqScheduler::new(Quanta::new(3, 2).unwrap());
        let pid = run_first(&mut ctx, &mut sched, 2);
        assert_eq!(
            sched.after_tick(&ctx, pid),
            TickDecision::Requeue {
                end: QueueEnd::Tail,
                reason: RequeueReason::QuantumExpired
            }
        );
    }

    #[test]
    fn test_level3_runs_without_quantum() {
        let mut ctx = ctx_with(&[Level::Three, Level::Three]);
        let mut sched = MlqScheduler::default();
        let pid = run_first(&mut ctx, &mut sched, 1_000);
        assert_eq!(sched.after_tick(&ctx, pid), TickDecision::Continue);
        assert_eq!(sched.quantum(Level::Three), None);
    }

    #[test]
    fn test_level3_requeues_at_head() {
        let mut ctx = ctx_with(&[Level::Three, Level::Three]);
        let mut sched = MlqScheduler::default();
        let pid = run_first(&mut ctx, &mut sched, 1);

        let l2 = ctx.create_process("L2".into(), 1, 0, Level::Two, 0);
        ctx.admit(l2);
        assert_eq!(
            sched.after_tick(&ctx, pid),
            TickDecision::Requeue {
                end: QueueEnd::Head,
                reason: RequeueReason::Preempted { by: Level::Two }
            }
        );
    }
}
