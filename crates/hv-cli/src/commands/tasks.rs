//! Tasks command: lists the tasks assigned to a project.

use std::io::Write;

use anyhow::Result;
use hv_core::{HarvestAccessor, ProjectId, RecordMap, Reports, Task, TaskId};

use super::util::{require_success, write_json};

pub fn format_tasks<W: Write>(
    writer: &mut W,
    project_id: ProjectId,
    tasks: &RecordMap<TaskId, Task>,
) -> Result<()> {
    writeln!(writer, "Tasks for project {project_id} ({})", tasks.len())?;
    for task in tasks.values() {
        write!(writer, "- {}  {}", task.id, task.name)?;
        if task.deactivated {
            write!(writer, " (deactivated)")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Runs the tasks command.
pub fn run<A: HarvestAccessor, W: Write>(
    writer: &mut W,
    reports: &Reports<A>,
    project_id: ProjectId,
    json: bool,
) -> Result<()> {
    let tasks = require_success(reports.project_tasks(project_id)?)?.unwrap_or_default();

    if json {
        write_json(writer, &tasks)
    } else {
        format_tasks(writer, project_id, &tasks)
    }
}
