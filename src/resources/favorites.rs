//! The authenticated user's favorite components.

use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest, RequestBuilder};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};
use crate::resources::components::Component;

/// Client for `api/favorites` endpoints.
pub struct FavoritesClient {
    client: SonarClient,
}

impl FavoritesClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// Search the current user's favorites (paginated).
    #[must_use]
    pub fn search(&self) -> SearchFavoritesBuilder {
        PagedBuilder::new(
            SearchFavoritesRequest::default(),
            self.client.get_executor("api/favorites/search"),
        )
    }

    /// Add a component to the current user's favorites.
    #[must_use]
    pub fn add(&self) -> AddFavoriteBuilder {
        RequestBuilder::new(
            AddFavoriteRequest::default(),
            self.client.post_unit_executor("api/favorites/add"),
        )
    }

    /// Remove a component from the current user's favorites.
    #[must_use]
    pub fn remove(&self) -> RemoveFavoriteBuilder {
        RequestBuilder::new(
            RemoveFavoriteRequest::default(),
            self.client.post_unit_executor("api/favorites/remove"),
        )
    }
}

/// Builder for `api/favorites/search`.
pub type SearchFavoritesBuilder = PagedBuilder<SearchFavoritesRequest, SearchFavoritesResponse>;

/// Query parameters for `api/favorites/search`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchFavoritesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for SearchFavoritesRequest {}

impl PagedRequest for SearchFavoritesRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

/// One page of the user's favorites.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFavoritesResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    #[serde(default)]
    pub favorites: Vec<Component>,
}

impl PagedResponse for SearchFavoritesResponse {
    type Item = Component;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<Component> {
        self.favorites
    }
}

/// Builder for `api/favorites/add`.
pub type AddFavoriteBuilder = RequestBuilder<AddFavoriteRequest, ()>;

/// Parameters for `api/favorites/add`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddFavoriteRequest {
    /// Key of the component to favorite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl ApiRequest for AddFavoriteRequest {
    fn validate(&self) -> Result<()> {
        if self.component.is_none() {
            return Err(SonarError::Validation(
                "'component' is required to add a favorite".to_string(),
            ));
        }
        Ok(())
    }
}

impl AddFavoriteBuilder {
    /// Key of the component to favorite (required).
    #[must_use]
    pub fn component(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.component = Some(key.into()))
    }
}

/// Builder for `api/favorites/remove`.
pub type RemoveFavoriteBuilder = RequestBuilder<RemoveFavoriteRequest, ()>;

/// Parameters for `api/favorites/remove`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemoveFavoriteRequest {
    /// Key of the component to unfavorite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl ApiRequest for RemoveFavoriteRequest {
    fn validate(&self) -> Result<()> {
        if self.component.is_none() {
            return Err(SonarError::Validation(
                "'component' is required to remove a favorite".to_string(),
            ));
        }
        Ok(())
    }
}

impl RemoveFavoriteBuilder {
    /// Key of the component to unfavorite (required).
    #[must_use]
    pub fn component(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.component = Some(key.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_items_field_is_favorites() {
        let json = r#"{
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 1},
            "favorites": [{"key": "org.example:app", "name": "App", "qualifier": "TRK"}]
        }"#;
        let response: SearchFavoritesResponse =
            serde_json::from_str(json).expect("Failed to deserialize");
        let items = response.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key, "org.example:app");
    }

    #[test]
    fn test_add_requires_component() {
        assert!(AddFavoriteRequest::default().validate().is_err());
    }
}
