//! Users command: lists users selected by status and role.

use std::io::Write;

use anyhow::Result;
use hv_core::{HarvestAccessor, RecordMap, Reports, User, UserFilter, UserId};

use super::util::{require_success, write_json};

fn roles(user: &User) -> Vec<&'static str> {
    let mut roles = Vec::new();
    if user.is_admin {
        roles.push("admin");
    }
    if user.is_contractor {
        roles.push("contractor");
    }
    if !user.is_active {
        roles.push("inactive");
    }
    roles
}

pub fn format_users<W: Write>(
    writer: &mut W,
    filter: UserFilter,
    users: &RecordMap<UserId, User>,
) -> Result<()> {
    writeln!(writer, "Users: {filter} ({})", users.len())?;
    for user in users.values() {
        write!(writer, "- {}  {} <{}>", user.id, user.full_name(), user.email)?;
        let roles = roles(user);
        if roles.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(writer, " [{}]", roles.join(", "))?;
        }
    }
    Ok(())
}

/// Runs the users command.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    filter: UserFilter,
    json: bool,
) -> Result<()> {
    let users = require_success(reports.users(filter)?)?.unwrap_or_default();

    if json {
        write_json(writer, &users)
    } else {
        format_users(writer, filter, &users)
    }
}
