//! Harvest records as returned by the API.
//!
//! Boolean flags are parsed into real `bool`s. The API has sent them both as
//! JSON booleans and as the strings `"true"`/`"false"`, and older payloads use
//! hyphenated names (`is-active`), so both spellings are accepted.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A record addressable by its identifier.
pub trait Record {
    type Id: Copy + Eq + std::hash::Hash + fmt::Display;

    fn id(&self) -> Self::Id;
}

/// Generates a numeric ID newtype with common trait implementations.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(
    /// Identifier of a client.
    ClientId
);
define_numeric_id!(
    /// Identifier of a project.
    ProjectId
);
define_numeric_id!(
    /// Identifier of a user (a "person" in the API paths).
    UserId
);
define_numeric_id!(
    /// Identifier of a task.
    TaskId
);
define_numeric_id!(TimeEntryId);
define_numeric_id!(TaskAssignmentId);

/// Deserializes a flag sent either as a JSON boolean or as `"true"`/`"false"`.
mod flag {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Ok(value),
            Raw::Text(text) => match text.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"\"true\" or \"false\"",
                )),
            },
        }
    }
}

/// A customer that projects are billed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub active: bool,
    pub currency: Option<String>,
    pub details: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A project belonging to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: ClientId,
    pub name: String,
    pub code: Option<String>,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub active: bool,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub billable: bool,
    pub bill_by: Option<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An account member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(alias = "is-active", deserialize_with = "flag::deserialize", default)]
    pub is_active: bool,
    #[serde(alias = "is-admin", deserialize_with = "flag::deserialize", default)]
    pub is_admin: bool,
    #[serde(alias = "is-contractor", deserialize_with = "flag::deserialize", default)]
    pub is_contractor: bool,
    pub department: Option<String>,
    pub timezone: Option<String>,
    pub default_hourly_rate: Option<f64>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A kind of work that can be assigned to projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub billable_by_default: bool,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub deactivated: bool,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub is_default: bool,
    pub default_hourly_rate: Option<f64>,
}

/// Links a task to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: TaskAssignmentId,
    pub project_id: ProjectId,
    pub task_id: TaskId,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub billable: bool,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub deactivated: bool,
    pub hourly_rate: Option<f64>,
    pub budget: Option<f64>,
}

/// Time logged by a user against a project task on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub task_id: TaskId,
    pub spent_at: NaiveDate,
    #[serde(default)]
    pub hours: f64,
    pub notes: Option<String>,
    /// Set while the entry's timer is running.
    pub timer_started_at: Option<String>,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub is_closed: bool,
    #[serde(deserialize_with = "flag::deserialize", default)]
    pub is_billed: bool,
}

impl TimeEntry {
    /// True once a timer start marker is present, whatever its value.
    pub const fn is_running(&self) -> bool {
        self.timer_started_at.is_some()
    }
}

macro_rules! impl_record {
    ($($record:ty => $id:ty),* $(,)?) => {
        $(
            impl Record for $record {
                type Id = $id;

                fn id(&self) -> Self::Id {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    Client => ClientId,
    Project => ProjectId,
    User => UserId,
    Task => TaskId,
    TaskAssignment => TaskAssignmentId,
    TimeEntry => TimeEntryId,
);
