use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::{
    process::{FinishedProcess, ProcessSpec, admission_order},
    timeline::Timeline,
};
use crate::{
    core::{Level, ProcId, Process, SchedCore, SchedEvent, Ticks},
    error::SimError,
    scheduler::Scheduler,
};

/// Result of running a workload to completion.
#[derive(Debug)]
pub struct Outcome {
    /// In completion order.
    pub finished: Vec<FinishedProcess>,
    pub events: Vec<SchedEvent>,
    /// Final process table, indexed by `ProcId` (admission order).
    pub processes: Vec<Process>,
}

impl Outcome {
    pub fn timeline(&self) -> Timeline {
        Timeline::from_events(&self.events, &self.processes)
    }
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Next process to admit. The table is built in admission order, so ids
    // below this are admitted and the rest are still pending.
    next_arrival: ProcId,
    finished: Vec<ProcId>,
}

impl<S: Scheduler> Sim<S> {
    /// Puts `specs` in [`admission_order`], validates them and sets up the run.
    pub fn new(mut specs: Vec<ProcessSpec>, scheduler: S) -> Result<Self, SimError> {
        specs.sort_by(admission_order);
        let checked = validate(specs)?;

        let mut core = SchedCore::new(scheduler);
        for spec in checked {
            core.ctx
                .create_process(spec.label, spec.burst, spec.arrival, spec.level, spec.priority);
        }
        if let Some(first) = core.ctx.procs.first() {
            let t = first.arrival;
            core.ctx.jump_to(t);
        }

        Ok(Self {
            core,
            next_arrival: 0,
            finished: Vec::new(),
        })
    }

    /// One iteration of the dispatch loop.
    ///
    /// Admits arrivals, dispatches if the CPU is free (or skips ahead to the
    /// next arrival when nothing is ready), runs one tick, admits again, then
    /// applies completion and requeue rules.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }

        self.handle_arrivals(&mut events);

        if !self.core.dispatch(&mut events) {
            // Nothing ready, so whatever is unfinished has yet to arrive
            if let Some(next) = self.core.ctx.procs.get(self.next_arrival) {
                let (from, to) = (self.core.now(), next.arrival);
                self.core.ctx.jump_to(to);
                events.push(SchedEvent::Idle { from, to });
            }
            self.log(&events);
            return events;
        }

        self.core.run_tick(&mut events);
        self.handle_arrivals(&mut events);
        if let Some(pid) = self.core.settle(&mut events) {
            self.finished.push(pid);
        }
        self.core.observe();

        self.log(&events);
        events
    }

    pub fn run(mut self) -> Outcome {
        info!(
            processes = self.core.ctx.procs.len(),
            start = self.core.now(),
            "starting simulation"
        );

        let mut log = Vec::new();
        while !self.is_finished() {
            log.extend(self.step());
        }

        info!(
            end = self.core.now(),
            steps = self.core.observer().steps(),
            "simulation finished"
        );

        let finished = self.finished().collect();
        Outcome {
            finished,
            events: log,
            processes: self.core.ctx.procs,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.len() == self.core.ctx.procs.len()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    /// Finished processes in completion order.
    pub fn finished(&self) -> impl Iterator<Item = FinishedProcess> + '_ {
        self.finished
            .iter()
            .filter_map(|&pid| FinishedProcess::from_process(self.core.ctx.proc(pid)))
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SchedEvent>) {
        let now = self.core.now();
        while let Some(proc) = self.core.ctx.procs.get(self.next_arrival) {
            if proc.arrival > now {
                break;
            }
            let (pid, level) = (proc.id, proc.level);
            self.core.ctx.admit(pid);
            events.push(SchedEvent::Admitted { at: now, pid, level });
            self.next_arrival += 1;
        }
    }

    fn log(&self, events: &[SchedEvent]) {
        for event in events {
            let label = event.pid().map(|pid| self.core.ctx.proc(pid).label.as_str());
            debug!(?label, ?event, "sched");
        }
    }
}

struct CheckedSpec {
    label: String,
    burst: Ticks,
    arrival: Ticks,
    level: Level,
    priority: i64,
}

/// Expects `specs` in admission order.
fn validate(specs: Vec<ProcessSpec>) -> Result<Vec<CheckedSpec>, SimError> {
    {
        let mut labels = FxHashSet::default();
        for spec in &specs {
            if !labels.insert(spec.label.as_str()) {
                return Err(SimError::DuplicateLabel {
                    label: spec.label.clone(),
                });
            }
        }
    }

    // Completion tick of the last process when the CPU never idles with work
    // pending. No tick of the run goes past it.
    let mut horizon: Ticks = 0;

    specs
        .into_iter()
        .map(|spec| {
            let Some(level) = Level::from_number(spec.queue) else {
                return Err(SimError::InvalidQueueLevel {
                    label: spec.label,
                    level: spec.queue,
                });
            };
            let burst = match Ticks::try_from(spec.burst) {
                Ok(burst) if burst > 0 => burst,
                _ => {
                    return Err(SimError::InvalidBurstTime {
                        label: spec.label,
                        burst: spec.burst,
                    });
                }
            };
            let Ok(arrival) = Ticks::try_from(spec.arrival) else {
                return Err(SimError::InvalidArrivalTime {
                    label: spec.label,
                    arrival: spec.arrival,
                });
            };
            let Some(end) = horizon.max(arrival).checked_add(burst) else {
                return Err(SimError::TimeOverflow { label: spec.label });
            };
            horizon = end;

            Ok(CheckedSpec {
                label: spec.label,
                burst,
                arrival,
                level,
                priority: spec.priority,
            })
        })
        .collect()
}
