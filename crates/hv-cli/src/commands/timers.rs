//! Timers command: shows today's running timers.

use std::io::Write;

use anyhow::Result;
use hv_core::{HarvestAccessor, RecordMap, Reports, TimeEntry, UserId};

use super::util::{describe_entry, require_success, write_json};

pub fn format_timers<W: Write>(
    writer: &mut W,
    timers: &RecordMap<UserId, TimeEntry>,
) -> Result<()> {
    if timers.is_empty() {
        writeln!(writer, "No running timers.")?;
        return Ok(());
    }

    writeln!(writer, "Running timers ({})", timers.len())?;
    for (user_id, entry) in timers.iter() {
        writeln!(writer, "- user {user_id}: {}", describe_entry(entry))?;
    }
    Ok(())
}

pub fn format_user_timer<W: Write>(
    writer: &mut W,
    user_id: UserId,
    timer: Option<&TimeEntry>,
) -> Result<()> {
    match timer {
        Some(entry) => writeln!(
            writer,
            "User {user_id} has a running timer: {}",
            describe_entry(entry)
        )?,
        None => writeln!(writer, "User {user_id} has no running timer.")?,
    }
    Ok(())
}

/// Runs the timers command.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    user: Option<UserId>,
    json: bool,
) -> Result<()> {
    if let Some(user_id) = user {
        let timer = require_success(reports.user_active_timer(user_id)?)?;
        return if json {
            write_json(writer, &timer)
        } else {
            format_user_timer(writer, user_id, timer.as_ref())
        };
    }

    let timers = require_success(reports.active_timers()?)?.unwrap_or_default();
    if json {
        write_json(writer, &timers)
    } else {
        format_timers(writer, &timers)
    }
}

#[cfg(test)]
mod tests {
    use hv_core::ApiResponse;

    use super::*;
    use crate::commands::fixtures::{FakeAccessor, entry, render, reports, user};

    fn accessor() -> FakeAccessor {
        let mut accessor = FakeAccessor {
            users: Some(ApiResponse::ok(
                [
                    user(1, "Ada", "Lovelace", (true, false, false)),
                    user(2, "Grace", "Hopper", (true, false, false)),
                    user(3, "Alan", "Turing", (false, false, false)),
                ]
                .into_iter()
                .collect(),
            )),
            ..FakeAccessor::default()
        };
        accessor.entries.insert(
            UserId::new(1),
            ApiResponse::ok(vec![
                entry(500, 1, 2.0, None),
                entry(501, 1, 0.25, Some("09:15")),
            ]),
        );
        accessor
            .entries
            .insert(UserId::new(2), ApiResponse::ok(vec![entry(600, 2, 1.0, None)]));
        accessor.entries.insert(
            UserId::new(3),
            ApiResponse::ok(vec![entry(700, 3, 1.0, Some("08:00"))]),
        );
        accessor
    }

    #[test]
    fn lists_running_timers_of_active_users() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, None, false));
        insta::assert_snapshot!(output, @r"
        Running timers (1)
        - user 1: entry 501 on project 70, task 100 (0.25h) since 09:15
        ");
    }

    #[test]
    fn reports_when_nothing_is_running() {
        let mut accessor = accessor();
        accessor.entries.remove(&UserId::new(1));
        let reports = reports(accessor);
        let output = render(|out| run(out, &reports, None, false));
        assert_eq!(output, "No running timers.\n");
    }

    #[test]
    fn shows_single_user_timer() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, Some(UserId::new(1)), false));
        assert_eq!(
            output,
            "User 1 has a running timer: entry 501 on project 70, task 100 (0.25h) since 09:15\n"
        );

        let output = render(|out| run(out, &reports, Some(UserId::new(2)), false));
        assert_eq!(output, "User 2 has no running timer.\n");
    }

    #[test]
    fn single_user_json_is_null_without_timer() {
        let reports = reports(accessor());
        let output = render(|out| run(out, &reports, Some(UserId::new(2)), true));
        assert_eq!(output, "null\n");
    }
}
