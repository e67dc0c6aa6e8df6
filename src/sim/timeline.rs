use std::fmt::Write as _;

use serde::Serialize;

use crate::core::{Level, ProcId, Process, SchedEvent, Ticks};

/// A stretch of consecutive ticks given to one process, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub pid: ProcId,
    pub label: String,
    pub level: Level,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Gantt view of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub slices: Vec<Slice>,
}

impl Timeline {
    pub fn from_events(events: &[SchedEvent], procs: &[Process]) -> Self {
        let mut slices: Vec<Slice> = Vec::new();
        for event in events {
            let SchedEvent::Tick { at, pid } = *event else {
                continue;
            };
            match slices.last_mut() {
                Some(last) if last.pid == pid && last.end == at => last.end += 1,
                _ => {
                    let proc = &procs[pid];
                    slices.push(Slice {
                        pid,
                        label: proc.label.clone(),
                        level: proc.level,
                        start: at,
                        end: at + 1,
                    });
                }
            }
        }
        Self { slices }
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.slices.iter().map(Slice::duration).sum()
    }

    /// One line per slice, with idle gaps shown explicitly.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut cursor = self.slices.first().map_or(0, |s| s.start);
        for slice in &self.slices {
            if slice.start > cursor {
                let _ = writeln!(out, "[{cursor:>4}, {:>4}) idle", slice.start);
            }
            let _ = writeln!(
                out,
                "[{:>4}, {:>4}) {} (Q{})",
                slice.start, slice.end, slice.label, slice.level
            );
            cursor = slice.end;
        }
        out
    }
}
