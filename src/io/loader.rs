use std::{fs, io, num::ParseIntError, path::Path};

use tracing::debug;

use crate::sim::{ProcessSpec, admission_order};

/// Parses `label;burst;arrival;queue;priority` records.
///
/// Blank lines and `#` comments are ignored. Empty fields are dropped before
/// counting, anything after the fifth field is ignored, and a record with
/// fewer than five fields or a non-integer number is skipped. Signed values
/// are kept as read; the simulation decides whether they are usable. The
/// result is in admission order.
pub fn parse_workload(text: &str) -> Vec<ProcessSpec> {
    let mut specs: Vec<ProcessSpec> = text
        .lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(i + 1, line))
        .collect();
    specs.sort_by(admission_order);
    specs
}

pub fn read_workload(path: impl AsRef<Path>) -> io::Result<Vec<ProcessSpec>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_workload(&text))
}

fn parse_line(line_no: usize, line: &str) -> Option<ProcessSpec> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    let [label, burst, arrival, queue, priority, ..] = fields[..] else {
        debug!(line_no, fields = fields.len(), "skipping short record");
        return None;
    };

    match parse_fields(label, burst, arrival, queue, priority) {
        Ok(spec) => Some(spec),
        Err(err) => {
            debug!(line_no, %err, "skipping malformed record");
            None
        }
    }
}

fn parse_fields(
    label: &str,
    burst: &str,
    arrival: &str,
    queue: &str,
    priority: &str,
) -> Result<ProcessSpec, ParseIntError> {
    Ok(ProcessSpec::new(
        label,
        burst.parse()?,
        arrival.parse()?,
        queue.parse()?,
        priority.parse()?,
    ))
}
