//! DevOps platform (ALM) integrations.
//!
//! These endpoints proxy the configured DevOps platform's own API, so
//! their pagination follows the upstream convention: Bitbucket Server
//! pages carry an `isLastPage` flag instead of a `paging` block. The
//! pagination engine normalizes both (see [`crate::pagination`]).

use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};

/// A repository visible through a Bitbucket Server integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitbucketServerRepo {
    /// Upstream repository id.
    pub id: u64,

    /// Repository name.
    pub name: String,

    /// Repository slug.
    #[serde(default)]
    pub slug: Option<String>,

    /// Upstream project key the repository belongs to.
    #[serde(default)]
    pub project_key: Option<String>,

    /// Key of the bound platform project, if already imported.
    #[serde(default)]
    pub sq_project_key: Option<String>,
}

/// Client for `api/alm_integrations` endpoints.
pub struct AlmIntegrationsClient {
    client: SonarClient,
}

impl AlmIntegrationsClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// Search repositories on a Bitbucket Server instance (paginated,
    /// upstream `isLastPage` convention).
    #[must_use]
    pub fn search_bitbucketserver_repos(&self) -> SearchBitbucketServerReposBuilder {
        PagedBuilder::new(
            SearchBitbucketServerReposRequest::default(),
            self.client
                .get_executor("api/alm_integrations/search_bitbucketserver_repos"),
        )
    }
}

/// Builder for `api/alm_integrations/search_bitbucketserver_repos`.
pub type SearchBitbucketServerReposBuilder =
    PagedBuilder<SearchBitbucketServerReposRequest, SearchBitbucketServerReposResponse>;

/// Query parameters for `api/alm_integrations/search_bitbucketserver_repos`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBitbucketServerReposRequest {
    /// Key of the ALM setting to search through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alm_setting: Option<String>,

    /// Filter on upstream project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Filter on repository name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for SearchBitbucketServerReposRequest {
    fn validate(&self) -> Result<()> {
        if self.alm_setting.is_none() {
            return Err(SonarError::Validation(
                "'almSetting' is required to search repositories".to_string(),
            ));
        }
        Ok(())
    }
}

impl PagedRequest for SearchBitbucketServerReposRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

impl SearchBitbucketServerReposBuilder {
    /// Key of the ALM setting to search through (required).
    #[must_use]
    pub fn alm_setting(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.alm_setting = Some(key.into()))
    }

    /// Filter on upstream project name.
    #[must_use]
    pub fn project_name(self, name: impl Into<String>) -> Self {
        self.modify(|r| r.project_name = Some(name.into()))
    }

    /// Filter on repository name.
    #[must_use]
    pub fn repository_name(self, name: impl Into<String>) -> Self {
        self.modify(|r| r.repository_name = Some(name.into()))
    }
}

/// One page of upstream repositories.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBitbucketServerReposResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    #[serde(default)]
    pub repositories: Vec<BitbucketServerRepo>,
}

impl PagedResponse for SearchBitbucketServerReposResponse {
    type Item = BitbucketServerRepo;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<BitbucketServerRepo> {
        self.repositories
    }
}
