//! Project administration and search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest, RequestBuilder};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};

/// A project known to the platform.
///
/// Projects are the top-level containers for analyzed code; the search
/// endpoint returns them under the `components` field because a project
/// is itself a component (qualifier `TRK`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project key (e.g., "org.example:my-project").
    pub key: String,

    /// Display name.
    pub name: String,

    /// Component qualifier (always `TRK` for projects).
    #[serde(default)]
    pub qualifier: Option<String>,

    /// Visibility ("public" or "private").
    #[serde(default)]
    pub visibility: Option<String>,

    /// When the project was last analyzed.
    #[serde(default)]
    pub last_analysis_date: Option<DateTime<Utc>>,

    /// Revision of the last analysis.
    #[serde(default)]
    pub revision: Option<String>,
}

/// Client for `api/projects` endpoints.
pub struct ProjectsClient {
    client: SonarClient,
}

impl ProjectsClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// Search projects (paginated).
    #[must_use]
    pub fn search(&self) -> SearchProjectsBuilder {
        PagedBuilder::new(
            SearchProjectsRequest::default(),
            self.client.get_executor("api/projects/search"),
        )
    }

    /// Provision a new project.
    #[must_use]
    pub fn create(&self) -> CreateProjectBuilder {
        RequestBuilder::new(
            CreateProjectRequest::default(),
            self.client.post_executor("api/projects/create"),
        )
    }

    /// Delete a project.
    #[must_use]
    pub fn delete(&self) -> DeleteProjectBuilder {
        RequestBuilder::new(
            DeleteProjectRequest::default(),
            self.client.post_unit_executor("api/projects/delete"),
        )
    }
}

/// Builder for `api/projects/search`.
pub type SearchProjectsBuilder = PagedBuilder<SearchProjectsRequest, SearchProjectsResponse>;

/// Query parameters for `api/projects/search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProjectsRequest {
    /// Text filter on project names and keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Only projects analyzed before this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_before: Option<DateTime<Utc>>,

    /// Only provisioned (never analyzed) projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_provisioned_only: Option<bool>,

    /// Comma-separated project keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for SearchProjectsRequest {}

impl PagedRequest for SearchProjectsRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

impl SearchProjectsBuilder {
    /// Filter on project names and keys.
    #[must_use]
    pub fn query(self, q: impl Into<String>) -> Self {
        self.modify(|r| r.q = Some(q.into()))
    }

    /// Only projects analyzed before the given instant.
    #[must_use]
    pub fn analyzed_before(self, instant: DateTime<Utc>) -> Self {
        self.modify(|r| r.analyzed_before = Some(instant))
    }

    /// Only provisioned (never analyzed) projects.
    #[must_use]
    pub fn provisioned_only(self, flag: bool) -> Self {
        self.modify(|r| r.on_provisioned_only = Some(flag))
    }

    /// Restrict to the given project keys.
    #[must_use]
    pub fn project_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = keys
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        self.modify(|r| r.projects = Some(joined))
    }
}

/// One page of project search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProjectsResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    #[serde(default)]
    pub components: Vec<Project>,
}

impl PagedResponse for SearchProjectsResponse {
    type Item = Project;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<Project> {
        self.components
    }
}

/// Builder for `api/projects/create`.
pub type CreateProjectBuilder = RequestBuilder<CreateProjectRequest, CreateProjectResponse>;

/// Parameters for `api/projects/create`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProjectRequest {
    /// The key of the project to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Visibility ("public" or "private").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

impl ApiRequest for CreateProjectRequest {
    fn validate(&self) -> Result<()> {
        if self.project.is_none() {
            return Err(SonarError::Validation(
                "'project' is required to create a project".to_string(),
            ));
        }
        if self.name.is_none() {
            return Err(SonarError::Validation(
                "'name' is required to create a project".to_string(),
            ));
        }
        Ok(())
    }
}

impl CreateProjectBuilder {
    /// The key of the project to create (required).
    #[must_use]
    pub fn project(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.project = Some(key.into()))
    }

    /// Display name (required).
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.modify(|r| r.name = Some(name.into()))
    }

    /// Visibility ("public" or "private").
    #[must_use]
    pub fn visibility(self, visibility: impl Into<String>) -> Self {
        self.modify(|r| r.visibility = Some(visibility.into()))
    }
}

/// Response of `api/projects/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectResponse {
    /// The created project.
    pub project: Project,
}

/// Builder for `api/projects/delete`.
pub type DeleteProjectBuilder = RequestBuilder<DeleteProjectRequest, ()>;

/// Parameters for `api/projects/delete`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteProjectRequest {
    /// The key of the project to delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl ApiRequest for DeleteProjectRequest {
    fn validate(&self) -> Result<()> {
        if self.project.is_none() {
            return Err(SonarError::Validation(
                "'project' is required to delete a project".to_string(),
            ));
        }
        Ok(())
    }
}

impl DeleteProjectBuilder {
    /// The key of the project to delete (required).
    #[must_use]
    pub fn project(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.project = Some(key.into()))
    }
}
