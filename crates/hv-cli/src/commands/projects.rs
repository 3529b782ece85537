//! Projects command: lists active or inactive projects, across the account or
//! for a single client.

use std::io::Write;

use anyhow::Result;
use hv_core::{ClientId, HarvestAccessor, Project, ProjectId, RecordMap, Reports};

use super::util::{require_success, write_json};

pub fn format_projects<W: Write>(
    writer: &mut W,
    heading: &str,
    projects: &RecordMap<ProjectId, Project>,
) -> Result<()> {
    writeln!(writer, "{heading} ({})", projects.len())?;
    for project in projects.values() {
        write!(writer, "- {}  {}", project.id, project.name)?;
        if let Some(code) = project.code.as_deref().filter(|c| !c.is_empty()) {
            write!(writer, " [{code}]")?;
        }
        writeln!(writer, " (client {})", project.client_id)?;
    }
    Ok(())
}

/// Runs the projects command.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    client: Option<ClientId>,
    inactive: bool,
    json: bool,
) -> Result<()> {
    let state = if inactive { "Inactive" } else { "Active" };
    let (heading, response) = match client {
        Some(client_id) => {
            let response = if inactive {
                reports.client_inactive_projects(client_id)?
            } else {
                reports.client_active_projects(client_id)?
            };
            (format!("{state} projects for client {client_id}"), response)
        }
        None => {
            let response = if inactive {
                reports.inactive_projects()?
            } else {
                reports.active_projects()?
            };
            (format!("{state} projects"), response)
        }
    };
    let projects = require_success(response)?.unwrap_or_default();

    if json {
        write_json(writer, &projects)
    } else {
        format_projects(writer, &heading, &projects)
    }
}
