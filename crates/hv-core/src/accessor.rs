//! Raw API calls the reports are built from.

use crate::model::{
    Client, ClientId, Project, ProjectId, Task, TaskAssignment, TaskId, TimeEntry, User, UserId,
};
use crate::range::Range;
use crate::record_map::RecordMap;
use crate::response::ApiResponse;

/// Read access to the Harvest API.
///
/// An HTTP status outside 2xx is reported as an `Ok` response whose
/// [`ApiResponse::is_success`] is false. `Err` is reserved for calls that
/// produced no usable response at all (connection failures, undecodable
/// bodies).
pub trait HarvestAccessor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_clients(&self) -> Result<ApiResponse<RecordMap<ClientId, Client>>, Self::Error>;

    fn list_projects(&self) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, Self::Error>;

    fn list_client_projects(
        &self,
        client_id: ClientId,
    ) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, Self::Error>;

    fn list_users(&self) -> Result<ApiResponse<RecordMap<UserId, User>>, Self::Error>;

    fn list_user_entries(
        &self,
        user_id: UserId,
        range: &Range,
    ) -> Result<ApiResponse<Vec<TimeEntry>>, Self::Error>;

    fn list_project_task_assignments(
        &self,
        project_id: ProjectId,
    ) -> Result<ApiResponse<Vec<TaskAssignment>>, Self::Error>;

    fn get_task(&self, task_id: TaskId) -> Result<ApiResponse<Task>, Self::Error>;
}

impl<A: HarvestAccessor + ?Sized> HarvestAccessor for &A {
    type Error = A::Error;

    fn list_clients(&self) -> Result<ApiResponse<RecordMap<ClientId, Client>>, Self::Error> {
        (**self).list_clients()
    }

    fn list_projects(&self) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, Self::Error> {
        (**self).list_projects()
    }

    fn list_client_projects(
        &self,
        client_id: ClientId,
    ) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, Self::Error> {
        (**self).list_client_projects(client_id)
    }

    fn list_users(&self) -> Result<ApiResponse<RecordMap<UserId, User>>, Self::Error> {
        (**self).list_users()
    }

    fn list_user_entries(
        &self,
        user_id: UserId,
        range: &Range,
    ) -> Result<ApiResponse<Vec<TimeEntry>>, Self::Error> {
        (**self).list_user_entries(user_id, range)
    }

    fn list_project_task_assignments(
        &self,
        project_id: ProjectId,
    ) -> Result<ApiResponse<Vec<TaskAssignment>>, Self::Error> {
        (**self).list_project_task_assignments(project_id)
    }

    fn get_task(&self, task_id: TaskId) -> Result<ApiResponse<Task>, Self::Error> {
        (**self).get_task(task_id)
    }
}
