//! Installed plugins.

use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest};
use crate::client::SonarClient;
use crate::pagination::{PageMeta, PagedResponse};

/// An installed analysis plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    /// The plugin key (e.g., "java").
    pub key: String,

    /// Display name.
    pub name: String,

    /// Installed version.
    #[serde(default)]
    pub version: Option<String>,

    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Client for `api/plugins` endpoints.
pub struct PluginsClient {
    client: SonarClient,
}

impl PluginsClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// List installed plugins.
    ///
    /// The endpoint returns the whole list in one response with no
    /// pagination metadata; `all()` on the returned builder yields that
    /// single page and stops.
    #[must_use]
    pub fn installed(&self) -> InstalledPluginsBuilder {
        PagedBuilder::new(
            InstalledPluginsRequest::default(),
            self.client.get_executor("api/plugins/installed"),
        )
    }
}

/// Builder for `api/plugins/installed`.
pub type InstalledPluginsBuilder = PagedBuilder<InstalledPluginsRequest, InstalledPluginsResponse>;

/// Query parameters for `api/plugins/installed`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstalledPluginsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for InstalledPluginsRequest {}

impl PagedRequest for InstalledPluginsRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

/// Response of `api/plugins/installed`: all plugins, no pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledPluginsResponse {
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

impl PagedResponse for InstalledPluginsResponse {
    type Item = Plugin;

    fn page_meta(&self) -> PageMeta {
        PageMeta::Absent
    }

    fn into_items(self) -> Vec<Plugin> {
        self.plugins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_response_has_no_page_meta() {
        let json = r#"{"plugins": [{"key": "java", "name": "Java", "version": "7.30"}]}"#;
        let response: InstalledPluginsResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert!(matches!(response.page_meta(), PageMeta::Absent));
        assert_eq!(response.into_items().len(), 1);
    }
}
