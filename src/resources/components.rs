//! Component trees and lookups.

use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest, RequestBuilder};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};

/// A component: a project, directory, or file in the component tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// The component key.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Qualifier (`TRK` project, `DIR` directory, `FIL` file, ...).
    #[serde(default)]
    pub qualifier: Option<String>,

    /// Path relative to the project root (directories and files).
    #[serde(default)]
    pub path: Option<String>,

    /// Language key (files only).
    #[serde(default)]
    pub language: Option<String>,
}

/// Traversal strategy for `api/components/tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStrategy {
    /// Every descendant of the base component.
    All,
    /// Direct children only.
    Children,
    /// Leaves only (files).
    Leaves,
}

/// Client for `api/components` endpoints.
pub struct ComponentsClient {
    client: SonarClient,
}

impl ComponentsClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// Navigate a component's tree (paginated).
    #[must_use]
    pub fn tree(&self) -> ComponentTreeBuilder {
        PagedBuilder::new(
            ComponentTreeRequest::default(),
            self.client.get_executor("api/components/tree"),
        )
    }

    /// Fetch a single component with its ancestors.
    #[must_use]
    pub fn show(&self) -> ShowComponentBuilder {
        RequestBuilder::new(
            ShowComponentRequest::default(),
            self.client.get_executor("api/components/show"),
        )
    }
}

/// Builder for `api/components/tree`.
pub type ComponentTreeBuilder = PagedBuilder<ComponentTreeRequest, ComponentTreeResponse>;

/// Query parameters for `api/components/tree`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentTreeRequest {
    /// Base component key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Traversal strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<TreeStrategy>,

    /// Text filter on names, keys and paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Comma-separated qualifiers to keep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for ComponentTreeRequest {
    fn validate(&self) -> Result<()> {
        if self.component.is_none() {
            return Err(SonarError::Validation(
                "'component' is required to navigate a tree".to_string(),
            ));
        }
        Ok(())
    }
}

impl PagedRequest for ComponentTreeRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

impl ComponentTreeBuilder {
    /// Base component key (required).
    #[must_use]
    pub fn component(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.component = Some(key.into()))
    }

    /// Traversal strategy.
    #[must_use]
    pub fn strategy(self, strategy: TreeStrategy) -> Self {
        self.modify(|r| r.strategy = Some(strategy))
    }

    /// Filter on names, keys and paths.
    #[must_use]
    pub fn query(self, q: impl Into<String>) -> Self {
        self.modify(|r| r.q = Some(q.into()))
    }

    /// Restrict to the given qualifiers.
    #[must_use]
    pub fn qualifiers<I, S>(self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = qualifiers
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        self.modify(|r| r.qualifiers = Some(joined))
    }
}

/// One page of a component tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTreeResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    /// The component the tree was rooted at.
    #[serde(default)]
    pub base_component: Option<Component>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl PagedResponse for ComponentTreeResponse {
    type Item = Component;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<Component> {
        self.components
    }
}

/// Builder for `api/components/show`.
pub type ShowComponentBuilder = RequestBuilder<ShowComponentRequest, ShowComponentResponse>;

/// Query parameters for `api/components/show`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShowComponentRequest {
    /// Component key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl ApiRequest for ShowComponentRequest {
    fn validate(&self) -> Result<()> {
        if self.component.is_none() {
            return Err(SonarError::Validation(
                "'component' is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl ShowComponentBuilder {
    /// Component key (required).
    #[must_use]
    pub fn component(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.component = Some(key.into()))
    }
}

/// Response of `api/components/show`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowComponentResponse {
    /// The requested component.
    pub component: Component,
    /// Ancestors, closest first.
    #[serde(default)]
    pub ancestors: Vec<Component>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_strategy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TreeStrategy::Leaves).unwrap(),
            r#""leaves""#
        );
    }

    #[test]
    fn test_tree_request_requires_component() {
        assert!(ComponentTreeRequest::default().validate().is_err());
        let ok = ComponentTreeRequest {
            component: Some("org.example:app".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_tree_response_deserialize() {
        let json = r#"{
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 2},
            "baseComponent": {"key": "app", "name": "App", "qualifier": "TRK"},
            "components": [
                {"key": "app:src/main.rs", "name": "main.rs", "qualifier": "FIL", "language": "rust"},
                {"key": "app:src", "name": "src", "qualifier": "DIR"}
            ]
        }"#;
        let response: ComponentTreeResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        assert!(response.base_component.is_some());
        let items = response.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].language.as_deref(), Some("rust"));
    }
}
