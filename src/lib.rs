//! SonarQube Web API client library.
//!
//! A Rust library for interacting with a SonarQube-style code-quality
//! platform's REST API, organized around typed request builders: each
//! operation accumulates parameters through fluent setters and dispatches
//! through an injected executor, and paginated operations expose a lazy
//! stream that walks every page behind one iteration contract.
//!
//! # Quick Start
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use sonarapi::{Execute, SonarClient};
//!
//! #[tokio::main]
//! async fn main() -> sonarapi::Result<()> {
//!     // Create client from environment variables
//!     let client = SonarClient::from_env()?;
//!
//!     // Fetch a single page
//!     let page = client.projects().search().page_size(50).execute().await?;
//!     println!("{} projects in total", page.paging.map_or(0, |p| p.total));
//!
//!     // Or walk every page lazily
//!     let all: Vec<_> = client
//!         .projects()
//!         .search()
//!         .query("payments")
//!         .all()
//!         .try_collect()
//!         .await?;
//!     println!("Found {} projects", all.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`SonarClient`] handles authentication and raw HTTP; per-resource
//!   clients ([`SonarClient::projects`], [`SonarClient::favorites`], ...)
//!   bind builders to endpoints.
//! - [`RequestBuilder`] accumulates a typed request and dispatches it via
//!   [`Execute::execute`].
//! - [`PagedBuilder`] adds page setters and [`PagedBuilder::all`], a
//!   single-pass stream that fetches pages strictly sequentially and
//!   normalizes the platform's two pagination encodings (`paging` blocks
//!   and Bitbucket-style `isLastPage` flags) via [`PageMeta`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SONAR_TOKEN` (required) - Your SonarQube user token
//! - `SONAR_URL` (optional) - Base URL (defaults to `http://localhost:9000`)

mod builder;
mod client;
mod error;
mod pagination;
mod resources;

// Re-export core types
pub use builder::{ApiRequest, Execute, Executor, PagedBuilder, PagedRequest, RequestBuilder};
pub use client::SonarClient;
pub use error::{Result, SonarError};
pub use pagination::{has_more_pages, PageMeta, PagedResponse, Paging};

// Re-export resource clients and models
pub use resources::{
    // ALM integration types
    AlmIntegrationsClient,
    BitbucketServerRepo,
    SearchBitbucketServerReposBuilder,
    SearchBitbucketServerReposRequest,
    SearchBitbucketServerReposResponse,
    // Component types
    Component,
    ComponentTreeBuilder,
    ComponentTreeRequest,
    ComponentTreeResponse,
    ComponentsClient,
    ShowComponentBuilder,
    ShowComponentRequest,
    ShowComponentResponse,
    TreeStrategy,
    // Favorite types
    AddFavoriteBuilder,
    AddFavoriteRequest,
    FavoritesClient,
    RemoveFavoriteBuilder,
    RemoveFavoriteRequest,
    SearchFavoritesBuilder,
    SearchFavoritesRequest,
    SearchFavoritesResponse,
    // Hotspot types
    Hotspot,
    HotspotStatus,
    HotspotsClient,
    SearchHotspotsBuilder,
    SearchHotspotsRequest,
    SearchHotspotsResponse,
    // Plugin types
    InstalledPluginsBuilder,
    InstalledPluginsRequest,
    InstalledPluginsResponse,
    Plugin,
    PluginsClient,
    // Project types
    CreateProjectBuilder,
    CreateProjectRequest,
    CreateProjectResponse,
    DeleteProjectBuilder,
    DeleteProjectRequest,
    Project,
    ProjectsClient,
    SearchProjectsBuilder,
    SearchProjectsRequest,
    SearchProjectsResponse,
    // Webhook types
    CreateWebhookBuilder,
    CreateWebhookRequest,
    CreateWebhookResponse,
    DeleteWebhookBuilder,
    DeleteWebhookRequest,
    ListWebhooksBuilder,
    ListWebhooksRequest,
    ListWebhooksResponse,
    Webhook,
    WebhookDeliveriesBuilder,
    WebhookDeliveriesRequest,
    WebhookDeliveriesResponse,
    WebhookDelivery,
    WebhooksClient,
};
