//! Core types and report logic for the Harvest client.
//!
//! This crate contains:
//! - Response envelope: status, payload and header metadata of one API call
//! - Records: clients, projects, users, tasks, assignments and time entries
//! - Reports: filtered and joined views composed from raw accessor calls

pub mod accessor;
pub mod model;
pub mod range;
mod record_map;
pub mod reports;
pub mod response;
pub mod settings;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use accessor::HarvestAccessor;
pub use model::{
    Client, ClientId, Project, ProjectId, Record, Task, TaskAssignment, TaskAssignmentId, TaskId,
    TimeEntry, TimeEntryId, User, UserId,
};
pub use range::{Period, Range, RangeError};
pub use record_map::RecordMap;
pub use reports::{Reports, UserFilter};
pub use response::{ApiResponse, Metadata, Property, PropertyError, PropertyValue, StatusCode};
pub use settings::{ReportSettings, SettingsError};
