use std::collections::VecDeque;
use std::fmt;

use serde::{Serialize, Serializer};

// Index into the process table
pub type ProcId = usize;
pub type Ticks = u64;

/// Static queue assignment of a process. `One` is the highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    /// Scan order used by the selection step.
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    pub fn from_number(n: i64) -> Option<Level> {
        match n {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            3 => Some(Level::Three),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    fn index(self) -> usize {
        match self {
            Level::One => 0,
            Level::Two => 1,
            Level::Three => 2,
        }
    }

    /// Levels that strictly outrank `self`.
    pub fn higher(self) -> &'static [Level] {
        match self {
            Level::One => &[],
            Level::Two => &[Level::One],
            Level::Three => &[Level::One, Level::Two],
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(self.number())
    }
}

/// Which end of its ready queue a preempted process goes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEnd {
    Head,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Pending,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcId,
    pub label: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub level: Level,
    pub priority: i64,
    pub state: ProcState,
    pub remaining: Ticks,
    pub start: Option<Ticks>,
    pub completion: Option<Ticks>,
}

/// One double-ended queue per level.
#[derive(Debug, Default)]
pub struct ReadyQueues {
    queues: [VecDeque<ProcId>; 3],
}

impl ReadyQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, level: Level, pid: ProcId) {
        self.queues[level.index()].push_back(pid);
    }

    pub fn push_front(&mut self, level: Level, pid: ProcId) {
        self.queues[level.index()].push_front(pid);
    }

    pub fn pop_front(&mut self, level: Level) -> Option<ProcId> {
        self.queues[level.index()].pop_front()
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.queues[level.index()].is_empty()
    }

    pub fn len(&self, level: Level) -> usize {
        self.queues[level.index()].len()
    }

    pub fn all_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Highest non-empty level, if any.
    pub fn first_non_empty(&self) -> Option<Level> {
        Level::ALL.into_iter().find(|&level| !self.is_empty(level))
    }

    pub fn contains(&self, level: Level, pid: ProcId) -> bool {
        self.queues[level.index()].contains(&pid)
    }

    pub fn iter(&self, level: Level) -> impl Iterator<Item = ProcId> + '_ {
        self.queues[level.index()].iter().copied()
    }
}

/// All mutable state of one simulation run.
#[derive(Debug)]
pub struct MlqCtx {
    pub now: Ticks,
    pub procs: Vec<Process>,
    pub ready: ReadyQueues,
    pub current: Option<ProcId>,
    // Ticks run by `current` since its last dispatch
    pub quantum_used: Ticks,
}

impl MlqCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            procs: Vec::new(),
            ready: ReadyQueues::new(),
            current: None,
            quantum_used: 0,
        }
    }

    pub fn create_process(
        &mut self,
        label: String,
        burst: Ticks,
        arrival: Ticks,
        level: Level,
        priority: i64,
    ) -> ProcId {
        let id = self.procs.len();
        self.procs.push(Process {
            id,
            label,
            burst,
            arrival,
            level,
            priority,
            state: ProcState::Pending,
            remaining: burst,
            start: None,
            completion: None,
        });
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self
            .now
            .checked_add(delta)
            .expect("run horizon is bounded when the workload is validated");
    }

    pub fn jump_to(&mut self, t: Ticks) {
        debug_assert!(t >= self.now, "time cannot move backwards ({} -> {t})", self.now);
        self.now = t;
    }

    pub fn proc(&self, pid: ProcId) -> &Process {
        &self.procs[pid]
    }

    pub fn proc_mut(&mut self, pid: ProcId) -> &mut Process {
        &mut self.procs[pid]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Admission: first entry of a process into its ready queue.
    pub fn admit(&mut self, pid: ProcId) {
        let proc = self.proc_mut(pid);
        debug_assert_eq!(proc.state, ProcState::Pending, "{} admitted twice", proc.label);
        proc.state = ProcState::Ready;
        let level = proc.level;
        self.ready.push_back(level, pid);
    }

    pub fn set_running(&mut self, pid: ProcId) {
        debug_assert!(self.current.is_none(), "CPU already running a process");
        let proc = self.proc_mut(pid);
        debug_assert_eq!(proc.state, ProcState::Ready, "{} must be ready to run", proc.label);
        proc.state = ProcState::Running;
        self.current = Some(pid);
        self.quantum_used = 0;
    }

    /// Takes the running process off the CPU and puts it back at one end of its queue.
    pub fn requeue_current(&mut self, end: QueueEnd) -> Option<ProcId> {
        let pid = self.current.take()?;
        self.quantum_used = 0;
        let proc = self.proc_mut(pid);
        proc.state = ProcState::Ready;
        let level = proc.level;
        match end {
            QueueEnd::Head => self.ready.push_front(level, pid),
            QueueEnd::Tail => self.ready.push_back(level, pid),
        }
        Some(pid)
    }

    pub fn complete_current(&mut self) -> Option<ProcId> {
        let pid = self.current.take()?;
        self.quantum_used = 0;
        let now = self.now;
        let proc = self.proc_mut(pid);
        debug_assert_eq!(proc.remaining, 0, "{} completed with work left", proc.label);
        proc.state = ProcState::Finished;
        proc.completion = Some(now);
        Some(pid)
    }
}
