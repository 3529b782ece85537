//! Shared utilities for CLI commands.

use std::io::Write;

use anyhow::{Result, bail};
use hv_core::{ApiResponse, TimeEntry};
use serde::Serialize;

/// Unwraps a response's payload, turning a failed status into an error.
pub fn require_success<T>(response: ApiResponse<T>) -> Result<Option<T>> {
    if !response.is_success() {
        bail!("request failed with status {}", response.status_code());
    }
    Ok(response.into_payload())
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Formats hours with two decimals, e.g. `1.50h`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}h")
}

/// One-line description of a time entry.
pub fn describe_entry(entry: &TimeEntry) -> String {
    let mut line = format!(
        "entry {} on project {}, task {} ({})",
        entry.id,
        entry.project_id,
        entry.task_id,
        format_hours(entry.hours)
    );
    if let Some(started) = &entry.timer_started_at {
        line.push_str(&format!(" since {started}"));
    }
    line
}
