//! Entries command: lists a user's time entries over a period.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use hv_core::{HarvestAccessor, Period, Range, Reports, TimeEntry, UserId};
use serde::Serialize;

use super::util::{describe_entry, format_hours, require_success, write_json};

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonEntries<'a> {
    pub user_id: UserId,
    pub range: &'a Range,
    pub total_hours: f64,
    pub entries: &'a [TimeEntry],
}

pub fn total_hours(entries: &[TimeEntry]) -> f64 {
    entries.iter().map(|entry| entry.hours).sum()
}

pub fn format_entries<W: Write>(
    writer: &mut W,
    user_id: UserId,
    range: &Range,
    entries: &[TimeEntry],
) -> Result<()> {
    writeln!(
        writer,
        "Entries for user {user_id}, {range} ({} entries, {})",
        entries.len(),
        format_hours(total_hours(entries))
    )?;
    for entry in entries {
        write!(writer, "- {}  {}", entry.spent_at, describe_entry(entry))?;
        match entry.notes.as_deref().map(str::trim) {
            Some(notes) if !notes.is_empty() => writeln!(writer, ": {notes}")?,
            _ => writeln!(writer)?,
        }
    }
    Ok(())
}

/// Runs the entries command for the period ending around `now`.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    user_id: UserId,
    period: Period,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let range = reports.settings().range(period, now);
    let entries =
        require_success(reports.user_entries(user_id, period, now)?)?.unwrap_or_default();

    if json {
        write_json(
            writer,
            &JsonEntries {
                user_id,
                range: &range,
                total_hours: total_hours(&entries),
                entries: &entries,
            },
        )
    } else {
        format_entries(writer, user_id, &range, &entries)
    }
}
