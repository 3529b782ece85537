//! Aggregated views over raw accessor calls.
//!
//! # Failure policies
//!
//! - Single-pass reports (clients, projects, users) make one call. A failed
//!   response is returned unchanged; a successful one has its payload
//!   replaced by the matching records, keyed by id in source order.
//! - [`Reports::active_timers`] and [`Reports::project_tasks`] make one call
//!   per item. A failed or errored per-item call drops that item and the scan
//!   carries on.
//! - [`Reports::user_active_timer`] makes one call and returns its failure
//!   directly.
//!
//! Transport errors (`Err`) from the first call of any report propagate.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::accessor::HarvestAccessor;
use crate::model::{
    Client, ClientId, Project, ProjectId, Record, Task, TaskId, TimeEntry, User, UserId,
};
use crate::range::Period;
use crate::record_map::RecordMap;
use crate::response::ApiResponse;
use crate::settings::ReportSettings;

/// Predicates for selecting users by status and role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFilter {
    Active,
    Inactive,
    Admins,
    ActiveAdmins,
    /// Inactive users flagged as admins.
    InactiveAdmins,
    Contractors,
    ActiveContractors,
    /// Inactive users flagged as contractors.
    InactiveContractors,
}

impl UserFilter {
    pub const ALL: [Self; 8] = [
        Self::Active,
        Self::Inactive,
        Self::Admins,
        Self::ActiveAdmins,
        Self::InactiveAdmins,
        Self::Contractors,
        Self::ActiveContractors,
        Self::InactiveContractors,
    ];

    pub const fn matches(self, user: &User) -> bool {
        match self {
            Self::Active => user.is_active,
            Self::Inactive => !user.is_active,
            Self::Admins => user.is_admin,
            Self::ActiveAdmins => user.is_active && user.is_admin,
            Self::InactiveAdmins => !user.is_active && user.is_admin,
            Self::Contractors => user.is_contractor,
            Self::ActiveContractors => user.is_active && user.is_contractor,
            Self::InactiveContractors => !user.is_active && user.is_contractor,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Admins => "admins",
            Self::ActiveAdmins => "active-admins",
            Self::InactiveAdmins => "inactive-admins",
            Self::Contractors => "contractors",
            Self::ActiveContractors => "active-contractors",
            Self::InactiveContractors => "inactive-contractors",
        }
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps the successful response's records matching `keep`, keyed by id.
fn select<V: Record>(
    report: &'static str,
    mut response: ApiResponse<RecordMap<V::Id, V>>,
    mut keep: impl FnMut(&V) -> bool,
) -> ApiResponse<RecordMap<V::Id, V>> {
    if !response.is_success() {
        debug!(report, status = %response.status_code(), "request failed");
        return response;
    }

    let selected: RecordMap<V::Id, V> = response
        .take_payload()
        .into_iter()
        .flatten()
        .map(|(_, record)| record)
        .filter(|record| keep(record))
        .collect();
    debug!(report, selected = selected.len(), "filtered records");
    response.set_payload(Some(selected));
    response
}

fn first_running(entries: Vec<TimeEntry>) -> Option<TimeEntry> {
    entries.into_iter().find(TimeEntry::is_running)
}

/// Report queries composed from a [`HarvestAccessor`].
#[derive(Debug)]
pub struct Reports<A> {
    accessor: A,
    settings: ReportSettings,
}

type Listing<K, V, E> = Result<ApiResponse<RecordMap<K, V>>, E>;

impl<A: HarvestAccessor> Reports<A> {
    pub const fn new(accessor: A, settings: ReportSettings) -> Self {
        Self { accessor, settings }
    }

    pub const fn accessor(&self) -> &A {
        &self.accessor
    }

    pub const fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn active_clients(&self) -> Listing<ClientId, Client, A::Error> {
        Ok(select("active_clients", self.accessor.list_clients()?, |c| {
            c.active
        }))
    }

    pub fn inactive_clients(&self) -> Listing<ClientId, Client, A::Error> {
        Ok(select("inactive_clients", self.accessor.list_clients()?, |c| {
            !c.active
        }))
    }

    pub fn active_projects(&self) -> Listing<ProjectId, Project, A::Error> {
        Ok(select("active_projects", self.accessor.list_projects()?, |p| {
            p.active
        }))
    }

    pub fn inactive_projects(&self) -> Listing<ProjectId, Project, A::Error> {
        Ok(select(
            "inactive_projects",
            self.accessor.list_projects()?,
            |p| !p.active,
        ))
    }

    pub fn client_active_projects(
        &self,
        client_id: ClientId,
    ) -> Listing<ProjectId, Project, A::Error> {
        Ok(select(
            "client_active_projects",
            self.accessor.list_client_projects(client_id)?,
            |p| p.active,
        ))
    }

    pub fn client_inactive_projects(
        &self,
        client_id: ClientId,
    ) -> Listing<ProjectId, Project, A::Error> {
        Ok(select(
            "client_inactive_projects",
            self.accessor.list_client_projects(client_id)?,
            |p| !p.active,
        ))
    }

    /// Users matching `filter`.
    pub fn users(&self, filter: UserFilter) -> Listing<UserId, User, A::Error> {
        Ok(select(filter.as_str(), self.accessor.list_users()?, |u| {
            filter.matches(u)
        }))
    }

    pub fn active_users(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::Active)
    }

    pub fn inactive_users(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::Inactive)
    }

    pub fn admins(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::Admins)
    }

    pub fn active_admins(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::ActiveAdmins)
    }

    pub fn inactive_admins(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::InactiveAdmins)
    }

    pub fn contractors(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::Contractors)
    }

    pub fn active_contractors(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::ActiveContractors)
    }

    pub fn inactive_contractors(&self) -> Listing<UserId, User, A::Error> {
        self.users(UserFilter::InactiveContractors)
    }

    /// Running timers of every active user, keyed by user id.
    ///
    /// Looks at each active user's entries for today and keeps the first one
    /// with a timer marker. Users whose entries cannot be fetched are skipped.
    pub fn active_timers(&self) -> Listing<UserId, TimeEntry, A::Error> {
        self.active_timers_at(Utc::now())
    }

    /// [`Self::active_timers`] with "today" taken from `now`.
    pub fn active_timers_at(&self, now: DateTime<Utc>) -> Listing<UserId, TimeEntry, A::Error> {
        let mut users = self.active_users()?;
        if !users.is_success() {
            return Ok(users.with_payload(None));
        }

        let today = self.settings.range(Period::Today, now);
        let user_ids: Vec<UserId> = users
            .take_payload()
            .map(|users| users.values().map(|user| user.id).collect())
            .unwrap_or_default();

        let mut timers = RecordMap::new();
        for user_id in user_ids {
            match self.accessor.list_user_entries(user_id, &today) {
                Ok(entries) if entries.is_success() => {
                    if let Some(entry) = entries.into_payload().and_then(first_running) {
                        timers.insert(user_id, entry);
                    }
                }
                Ok(entries) => {
                    warn!(%user_id, status = %entries.status_code(), "skipping user, entries request failed");
                }
                Err(err) => {
                    warn!(%user_id, error = %err, "skipping user, entries request errored");
                }
            }
        }

        debug!(report = "active_timers", running = timers.len(), %today, "scanned users");
        Ok(users.with_payload(Some(timers)))
    }

    /// The running timer of one user today, if any.
    pub fn user_active_timer(
        &self,
        user_id: UserId,
    ) -> Result<ApiResponse<TimeEntry>, A::Error> {
        self.user_active_timer_at(user_id, Utc::now())
    }

    pub fn user_active_timer_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<ApiResponse<TimeEntry>, A::Error> {
        let today = self.settings.range(Period::Today, now);
        let mut entries = self.accessor.list_user_entries(user_id, &today)?;
        if !entries.is_success() {
            debug!(%user_id, status = %entries.status_code(), "entries request failed");
            return Ok(entries.with_payload(None));
        }

        let running = entries.take_payload().and_then(first_running);
        Ok(entries.with_payload(running))
    }

    /// Tasks assigned to a project, keyed by task id.
    ///
    /// Assignments whose task cannot be fetched are skipped.
    pub fn project_tasks(&self, project_id: ProjectId) -> Listing<TaskId, Task, A::Error> {
        let mut assignments = self.accessor.list_project_task_assignments(project_id)?;
        if !assignments.is_success() {
            debug!(%project_id, status = %assignments.status_code(), "assignments request failed");
            return Ok(assignments.with_payload(None));
        }

        let mut tasks = RecordMap::new();
        for assignment in assignments.take_payload().unwrap_or_default() {
            match self.accessor.get_task(assignment.task_id) {
                Ok(task) if task.is_success() => {
                    if let Some(task) = task.into_payload() {
                        tasks.insert(task.id(), task);
                    }
                }
                Ok(task) => {
                    warn!(task_id = %assignment.task_id, status = %task.status_code(), "skipping task, request failed");
                }
                Err(err) => {
                    warn!(task_id = %assignment.task_id, error = %err, "skipping task, request errored");
                }
            }
        }

        Ok(assignments.with_payload(Some(tasks)))
    }

    /// A user's entries over a named period ending around `now`.
    pub fn user_entries(
        &self,
        user_id: UserId,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<ApiResponse<Vec<TimeEntry>>, A::Error> {
        let range = self.settings.range(period, now);
        debug!(%user_id, %range, "listing entries");
        self.accessor.list_user_entries(user_id, &range)
    }
}
