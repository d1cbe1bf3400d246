//! Security hotspots.

use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};

/// A security hotspot: a piece of code requiring security review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// The hotspot key.
    pub key: String,

    /// Key of the component containing the hotspot.
    pub component: String,

    /// Key of the enclosing project.
    #[serde(default)]
    pub project: Option<String>,

    /// Security category (e.g., "sql-injection").
    #[serde(default)]
    pub security_category: Option<String>,

    /// Review priority ("HIGH", "MEDIUM", "LOW").
    #[serde(default)]
    pub vulnerability_probability: Option<String>,

    /// Review status.
    #[serde(default)]
    pub status: Option<HotspotStatus>,

    /// Line the hotspot sits on.
    #[serde(default)]
    pub line: Option<u32>,

    /// Rule message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Review status of a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotspotStatus {
    ToReview,
    Reviewed,
}

/// Client for `api/hotspots` endpoints.
pub struct HotspotsClient {
    client: SonarClient,
}

impl HotspotsClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// Search a project's hotspots (paginated).
    #[must_use]
    pub fn search(&self) -> SearchHotspotsBuilder {
        PagedBuilder::new(
            SearchHotspotsRequest::default(),
            self.client.get_executor("api/hotspots/search"),
        )
    }
}

/// Builder for `api/hotspots/search`.
pub type SearchHotspotsBuilder = PagedBuilder<SearchHotspotsRequest, SearchHotspotsResponse>;

/// Query parameters for `api/hotspots/search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHotspotsRequest {
    /// Key of the project to search in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    /// Filter by review status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HotspotStatus>,

    /// Only hotspots assigned to the current user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_mine: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for SearchHotspotsRequest {
    fn validate(&self) -> Result<()> {
        if self.project_key.is_none() {
            return Err(SonarError::Validation(
                "'projectKey' is required to search hotspots".to_string(),
            ));
        }
        Ok(())
    }
}

impl PagedRequest for SearchHotspotsRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

impl SearchHotspotsBuilder {
    /// Key of the project to search in (required).
    #[must_use]
    pub fn project_key(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.project_key = Some(key.into()))
    }

    /// Filter by review status.
    #[must_use]
    pub fn status(self, status: HotspotStatus) -> Self {
        self.modify(|r| r.status = Some(status))
    }

    /// Only hotspots assigned to the current user.
    #[must_use]
    pub fn only_mine(self, flag: bool) -> Self {
        self.modify(|r| r.only_mine = Some(flag))
    }
}

/// One page of hotspot search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHotspotsResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl PagedResponse for SearchHotspotsResponse {
    type Item = Hotspot;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<Hotspot> {
        self.hotspots
    }
}
