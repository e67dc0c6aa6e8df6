//! Text boundary of the simulator: workload files in, reports out.

pub mod generate;
pub mod loader;
pub mod report;

pub use generate::{GeneratorParams, generate_workload, render_workload};
pub use loader::{parse_workload, read_workload};
pub use report::{ReportFormat, render_events, render_json, render_report, write_report};
