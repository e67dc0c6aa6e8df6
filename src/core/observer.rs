use super::state::{Level, MlqCtx, ProcState};
use crate::scheduler::Scheduler;

/// Checks the run-wide invariants after every step (debug builds only).
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe<S: Scheduler>(&mut self, ctx: &MlqCtx, scheduler: &S) {
        self.step += 1;
        let step = self.step;

        if let Some(pid) = ctx.current {
            let proc = ctx.proc(pid);
            debug_assert_eq!(
                proc.state,
                ProcState::Running,
                "step {step}: cpu.current {} must be Running",
                proc.label
            );
            debug_assert!(
                !ctx.ready.contains(proc.level, pid),
                "step {step}: running process {} must not be queued",
                proc.label
            );
            if let Some(quantum) = scheduler.quantum(proc.level) {
                debug_assert!(
                    ctx.quantum_used < quantum,
                    "step {step}: {} kept the CPU past its quantum",
                    proc.label
                );
            }
        }

        let mut queued = 0;
        for level in Level::ALL {
            for pid in ctx.ready.iter(level) {
                queued += 1;
                let proc = ctx.proc(pid);
                debug_assert_eq!(
                    proc.state,
                    ProcState::Ready,
                    "step {step}: queued process {} is not Ready",
                    proc.label
                );
                debug_assert_eq!(
                    proc.level, level,
                    "step {step}: {} sits in the wrong queue",
                    proc.label
                );
            }
        }

        let ready = ctx
            .procs
            .iter()
            .filter(|p| p.state == ProcState::Ready)
            .count();
        debug_assert_eq!(
            ready, queued,
            "step {step}: every ready process must be queued exactly once"
        );

        for proc in &ctx.procs {
            debug_assert!(
                proc.remaining <= proc.burst,
                "step {step}: {} has more work left than its burst",
                proc.label
            );
            match proc.state {
                ProcState::Pending => debug_assert!(
                    proc.start.is_none() && proc.remaining == proc.burst,
                    "step {step}: {} ran before arriving",
                    proc.label
                ),
                ProcState::Finished => debug_assert!(
                    proc.remaining == 0
                        && proc
                            .start
                            .zip(proc.completion)
                            .is_some_and(|(s, c)| proc.arrival <= s && s <= c),
                    "step {step}: finished process {} has inconsistent timings",
                    proc.label
                ),
                ProcState::Ready | ProcState::Running => {}
            }
        }
    }
}
