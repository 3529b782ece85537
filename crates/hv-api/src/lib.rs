//! Blocking HTTP access to the Harvest API.
//!
//! [`HarvestClient`] implements [`HarvestAccessor`] over the JSON flavour of
//! the API. Every call is a `GET` authenticated with HTTP basic auth. List
//! endpoints answer with arrays of single-key wrappers
//! (`[{"client": {...}}]`), single resources with one wrapper
//! (`{"task": {...}}`).

use std::fmt;
use std::time::Duration;

use hv_core::{
    ApiResponse, Client, ClientId, HarvestAccessor, Metadata, Project, ProjectId, Range,
    RecordMap, Task, TaskAssignment, TaskId, TimeEntry, User, UserId,
};
use reqwest::header::{ACCEPT, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("hv/", env!("CARGO_PKG_VERSION"));

/// HTTP accessor errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided credentials were unusable.
    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: &'static str },
    /// The base URL could not be parsed.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// A successful response body could not be decoded.
    #[error("invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },
}

/// Account and login used for every request.
#[derive(Clone)]
pub struct Credentials {
    account: String,
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials after checking that no part is blank.
    pub fn new(
        account: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let credentials = Self {
            account: account.into(),
            username: username.into(),
            password: password.into(),
        };

        if credentials.account.trim().is_empty() {
            return Err(ApiError::InvalidCredentials {
                reason: "account cannot be empty",
            });
        }
        if credentials.username.trim().is_empty() {
            return Err(ApiError::InvalidCredentials {
                reason: "username cannot be empty",
            });
        }
        if credentials.password.is_empty() {
            return Err(ApiError::InvalidCredentials {
                reason: "password cannot be empty",
            });
        }
        Ok(credentials)
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Harvest API client.
///
/// Calls block the current thread until the response body has been read.
pub struct HarvestClient {
    http: reqwest::blocking::Client,
    base_url: String,
    credentials: Credentials,
}

impl fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl HarvestClient {
    /// Creates a client for `https://{account}.harvestapp.com`.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        let base_url = format!("https://{}.harvestapp.com", credentials.account);
        Self::with_base_url(credentials, base_url)
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        if let Err(err) = reqwest::Url::parse(&base_url) {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url,
                reason: err.to_string(),
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T>(
        &self,
        path: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status().as_u16();
        let metadata = metadata_from(response.headers());
        let body = response.text()?;

        let mut result = ApiResponse::new(status, None, Some(metadata));
        if !result.is_success() {
            debug!(%url, status, "request failed");
            return Ok(result);
        }
        if body.trim().is_empty() {
            return Ok(result);
        }

        let payload = parse(&body).map_err(|message| ApiError::InvalidResponse {
            path: path.to_string(),
            message,
        })?;
        result.set_payload(Some(payload));
        Ok(result)
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
    ) -> Result<ApiResponse<Vec<T>>, ApiError> {
        self.get(path, |body| parse_list(body, key))
    }

    fn get_map<V>(
        &self,
        path: &str,
        key: &'static str,
    ) -> Result<ApiResponse<RecordMap<V::Id, V>>, ApiError>
    where
        V: DeserializeOwned + hv_core::Record,
    {
        Ok(self
            .get_list(path, key)?
            .map_payload(|records| records.into_iter().collect()))
    }
}

impl HarvestAccessor for HarvestClient {
    type Error = ApiError;

    fn list_clients(&self) -> Result<ApiResponse<RecordMap<ClientId, Client>>, ApiError> {
        self.get_map("/clients", "client")
    }

    fn list_projects(&self) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, ApiError> {
        self.get_map("/projects", "project")
    }

    fn list_client_projects(
        &self,
        client_id: ClientId,
    ) -> Result<ApiResponse<RecordMap<ProjectId, Project>>, ApiError> {
        self.get_map(&format!("/projects?client={client_id}"), "project")
    }

    fn list_users(&self) -> Result<ApiResponse<RecordMap<UserId, User>>, ApiError> {
        self.get_map("/people", "user")
    }

    fn list_user_entries(
        &self,
        user_id: UserId,
        range: &Range,
    ) -> Result<ApiResponse<Vec<TimeEntry>>, ApiError> {
        self.get_list(
            &format!("/people/{user_id}/entries?{}", range.query()),
            "day_entry",
        )
    }

    fn list_project_task_assignments(
        &self,
        project_id: ProjectId,
    ) -> Result<ApiResponse<Vec<TaskAssignment>>, ApiError> {
        self.get_list(
            &format!("/projects/{project_id}/task_assignments"),
            "task_assignment",
        )
    }

    fn get_task(&self, task_id: TaskId) -> Result<ApiResponse<Task>, ApiError> {
        self.get(&format!("/tasks/{task_id}"), |body| parse_single(body, "task"))
    }
}

fn metadata_from(headers: &HeaderMap) -> Metadata {
    headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|value| (name.as_str(), value)))
        .collect()
}

fn unwrap_resource<T: DeserializeOwned>(
    mut wrapper: Map<String, Value>,
    key: &str,
) -> Result<T, String> {
    let value = wrapper
        .remove(key)
        .ok_or_else(|| format!("missing `{key}` wrapper"))?;
    serde_json::from_value(value).map_err(|err| err.to_string())
}

fn parse_list<T: DeserializeOwned>(body: &str, key: &str) -> Result<Vec<T>, String> {
    let wrappers: Vec<Map<String, Value>> =
        serde_json::from_str(body).map_err(|err| err.to_string())?;
    wrappers
        .into_iter()
        .map(|wrapper| unwrap_resource(wrapper, key))
        .collect()
}

fn parse_single<T: DeserializeOwned>(body: &str, key: &str) -> Result<T, String> {
    let wrapper: Map<String, Value> = serde_json::from_str(body).map_err(|err| err.to_string())?;
    unwrap_resource(wrapper, key)
}
