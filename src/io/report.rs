use std::{fmt::Write as _, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::core::SchedEvent;
use crate::metrics::{ProcessMetrics, Summary};
use crate::sim::FinishedProcess;

pub const HEADER: &str = "# label; BT; AT; Q; Pr; WT; CT; RT; TAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Text report: header, one row per process by label, then the means.
pub fn render_report(finished: &[FinishedProcess]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");

    for proc in by_label(finished) {
        let m = ProcessMetrics::of(proc);
        let _ = writeln!(
            out,
            "{};{};{};{};{};{};{};{};{}",
            proc.label,
            proc.burst,
            proc.arrival,
            proc.level,
            proc.priority,
            m.waiting,
            m.completion,
            m.response,
            m.turnaround
        );
    }

    if let Some(summary) = Summary::from_finished(finished) {
        let _ = writeln!(
            out,
            "\nWT={}; CT={}; RT={}; TAT={};",
            format_mean(summary.waiting),
            format_mean(summary.completion),
            format_mean(summary.response),
            format_mean(summary.turnaround)
        );
    }
    out
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    process: &'a FinishedProcess,
    metrics: ProcessMetrics,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    processes: Vec<JsonRow<'a>>,
    summary: Option<Summary>,
}

pub fn render_json(finished: &[FinishedProcess]) -> serde_json::Result<String> {
    let report = JsonReport {
        processes: by_label(finished)
            .into_iter()
            .map(|process| JsonRow {
                process,
                metrics: ProcessMetrics::of(process),
            })
            .collect(),
        summary: Summary::from_finished(finished),
    };
    serde_json::to_string_pretty(&report)
}

/// One JSON object per line.
pub fn render_events(events: &[SchedEvent]) -> serde_json::Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event)?);
        out.push('\n');
    }
    Ok(out)
}

pub fn write_report(
    path: impl AsRef<Path>,
    finished: &[FinishedProcess],
    format: ReportFormat,
) -> io::Result<()> {
    let contents = match format {
        ReportFormat::Text => render_report(finished),
        ReportFormat::Json => render_json(finished)?,
    };
    fs::write(path, contents)
}

fn by_label(finished: &[FinishedProcess]) -> Vec<&FinishedProcess> {
    let mut rows: Vec<_> = finished.iter().collect();
    rows.sort_by(|a, b| a.label.cmp(&b.label));
    rows
}

// Shortest round-trip digits. Decimal exponents in [-4, 16) print positionally,
// integral values with one decimal ("5.0"); the rest in scientific form with a
// signed two-digit exponent ("1e-05", "1.5e+16").
fn format_mean(mean: f64) -> String {
    if !mean.is_finite() {
        return mean.to_string();
    }
    let sci = format!("{mean:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if mean == 0.0 || (-4..16).contains(&exp) {
        if mean.fract() == 0.0 {
            format!("{mean:.1}")
        } else {
            mean.to_string()
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}
