//! Per-resource clients for the Web API.
//!
//! Each client is constructed from a [`crate::SonarClient`] and hands out
//! typed builders bound to executor closures for its endpoints.

mod alm_integrations;
mod components;
mod favorites;
mod hotspots;
mod plugins;
mod projects;
mod webhooks;

pub use alm_integrations::{
    AlmIntegrationsClient, BitbucketServerRepo, SearchBitbucketServerReposBuilder,
    SearchBitbucketServerReposRequest, SearchBitbucketServerReposResponse,
};
pub use components::{
    Component, ComponentTreeBuilder, ComponentTreeRequest, ComponentTreeResponse,
    ComponentsClient, ShowComponentBuilder, ShowComponentRequest, ShowComponentResponse,
    TreeStrategy,
};
pub use favorites::{
    AddFavoriteBuilder, AddFavoriteRequest, FavoritesClient, RemoveFavoriteBuilder,
    RemoveFavoriteRequest, SearchFavoritesBuilder, SearchFavoritesRequest,
    SearchFavoritesResponse,
};
pub use hotspots::{
    Hotspot, HotspotStatus, HotspotsClient, SearchHotspotsBuilder, SearchHotspotsRequest,
    SearchHotspotsResponse,
};
pub use plugins::{
    InstalledPluginsBuilder, InstalledPluginsRequest, InstalledPluginsResponse, Plugin,
    PluginsClient,
};
pub use projects::{
    CreateProjectBuilder, CreateProjectRequest, CreateProjectResponse, DeleteProjectBuilder,
    DeleteProjectRequest, Project, ProjectsClient, SearchProjectsBuilder, SearchProjectsRequest,
    SearchProjectsResponse,
};
pub use webhooks::{
    CreateWebhookBuilder, CreateWebhookRequest, CreateWebhookResponse, DeleteWebhookBuilder,
    DeleteWebhookRequest, ListWebhooksBuilder, ListWebhooksRequest, ListWebhooksResponse,
    Webhook, WebhookDeliveriesBuilder, WebhookDeliveriesRequest, WebhookDeliveriesResponse,
    WebhookDelivery, WebhooksClient,
};
