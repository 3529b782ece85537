//! In-memory [`HarvestAccessor`] for tests.
//!
//! Only compiled for this crate's tests or with the `test-utils` feature.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::accessor::HarvestAccessor;
use crate::model::{
    Client, ClientId, Project, ProjectId, Task, TaskAssignment, TaskId, TimeEntry, User, UserId,
};
use crate::range::Range;
use crate::record_map::RecordMap;
use crate::response::ApiResponse;

/// Transport error returned for unreachable users and tasks.
#[derive(Debug, Error)]
#[error("connection reset")]
pub struct FakeError;

/// Canned responses keyed by call; anything not configured answers `404`.
///
/// Every call is recorded in `calls`, and every range passed to
/// `list_user_entries` in `ranges`.
#[derive(Debug, Default)]
pub struct FakeAccessor {
    pub clients: Option<ApiResponse<RecordMap<ClientId, Client>>>,
    pub projects: Option<ApiResponse<RecordMap<ProjectId, Project>>>,
    pub client_projects: HashMap<ClientId, ApiResponse<RecordMap<ProjectId, Project>>>,
    pub users: Option<ApiResponse<RecordMap<UserId, User>>>,
    pub entries: HashMap<UserId, ApiResponse<Vec<TimeEntry>>>,
    pub assignments: HashMap<ProjectId, ApiResponse<Vec<TaskAssignment>>>,
    pub tasks: HashMap<TaskId, ApiResponse<Task>>,
    /// Users whose entries fetch fails with [`FakeError`].
    pub unreachable_users: HashSet<UserId>,
    /// Tasks whose fetch fails with [`FakeError`].
    pub unreachable_tasks: HashSet<TaskId>,
    pub calls: RefCell<Vec<String>>,
    pub ranges: RefCell<Vec<Range>>,
}

fn or_not_found<T: Clone>(response: Option<&ApiResponse<T>>) -> ApiResponse<T> {
    response
        .cloned()
        .unwrap_or_else(|| ApiResponse::status("404"))
}

impl FakeAccessor {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl HarvestAccessor for FakeAccessor {
    type Error = FakeError;

    fn list_clients(&self) -> Result<ApiResponse<RecordMap<ClientId, Client>>, FakeError> {
        self.record("clients".to_string());
        Ok(or_not_found(self.clients.as_ref()))
    }

    fn list_projects(&self) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, FakeError> {
        self.record("projects".to_string());
        Ok(or_not_found(self.projects.as_ref()))
    }

    fn list_client_projects(
        &self,
        client_id: ClientId,
    ) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, FakeError> {
        self.record(format!("projects?client={client_id}"));
        Ok(or_not_found(self.client_projects.get(&client_id)))
    }

    fn list_users(&self) -> Result<ApiResponse<RecordMap<UserId, User>>, FakeError> {
        self.record("people".to_string());
        Ok(or_not_found(self.users.as_ref()))
    }

    fn list_user_entries(
        &self,
        user_id: UserId,
        range: &Range,
    ) -> Result<ApiResponse<Vec<TimeEntry>>, FakeError> {
        self.record(format!("people/{user_id}/entries"));
        self.ranges.borrow_mut().push(*range);
        if self.unreachable_users.contains(&user_id) {
            return Err(FakeError);
        }
        Ok(or_not_found(self.entries.get(&user_id)))
    }

    fn list_project_task_assignments(
        &self,
        project_id: ProjectId,
    ) -> Result<ApiResponse<Vec<TaskAssignment>>, FakeError> {
        self.record(format!("projects/{project_id}/task_assignments"));
        Ok(or_not_found(self.assignments.get(&project_id)))
    }

    fn get_task(&self, task_id: TaskId) -> Result<ApiResponse<Task>, FakeError> {
        self.record(format!("tasks/{task_id}"));
        if self.unreachable_tasks.contains(&task_id) {
            return Err(FakeError);
        }
        Ok(or_not_found(self.tasks.get(&task_id)))
    }
}
