//! Sample records and report setup for command tests.

use chrono::NaiveDate;
pub use hv_core::testing::FakeAccessor;
use hv_core::{
    Client, ClientId, Project, ProjectId, ReportSettings, Reports, Task, TaskAssignment,
    TaskAssignmentId, TaskId, TimeEntry, TimeEntryId, User, UserId,
};

pub fn reports(accessor: FakeAccessor) -> Reports<FakeAccessor> {
    Reports::new(
        accessor,
        ReportSettings::parse(Some("monday"), Some("UTC")).unwrap(),
    )
}

pub fn client(id: u64, name: &str, active: bool) -> Client {
    Client {
        id: ClientId::new(id),
        name: name.to_string(),
        active,
        currency: Some("USD".to_string()),
        details: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn project(id: u64, client_id: u64, name: &str, active: bool) -> Project {
    Project {
        id: ProjectId::new(id),
        client_id: ClientId::new(client_id),
        name: name.to_string(),
        code: None,
        active,
        billable: true,
        bill_by: None,
        budget: None,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn user(id: u64, first: &str, last: &str, flags: (bool, bool, bool)) -> User {
    let (is_active, is_admin, is_contractor) = flags;
    User {
        id: UserId::new(id),
        email: format!("{}@example.com", first.to_lowercase()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        is_active,
        is_admin,
        is_contractor,
        department: None,
        timezone: None,
        default_hourly_rate: None,
    }
}

pub fn entry(id: u64, user_id: u64, hours: f64, started: Option<&str>) -> TimeEntry {
    TimeEntry {
        id: TimeEntryId::new(id),
        user_id: UserId::new(user_id),
        project_id: ProjectId::new(70),
        task_id: TaskId::new(100),
        spent_at: NaiveDate::from_ymd_opt(2025, 1, 29).unwrap(),
        hours,
        notes: Some("Standup".to_string()),
        timer_started_at: started.map(str::to_string),
        is_closed: false,
        is_billed: false,
    }
}

pub fn task(id: u64, name: &str) -> Task {
    Task {
        id: TaskId::new(id),
        name: name.to_string(),
        billable_by_default: true,
        deactivated: false,
        is_default: false,
        default_hourly_rate: None,
    }
}

pub fn assignment(id: u64, project_id: u64, task_id: u64) -> TaskAssignment {
    TaskAssignment {
        id: TaskAssignmentId::new(id),
        project_id: ProjectId::new(project_id),
        task_id: TaskId::new(task_id),
        billable: true,
        deactivated: false,
        hourly_rate: None,
        budget: None,
    }
}

pub fn render(run: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut output = Vec::new();
    run(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}
