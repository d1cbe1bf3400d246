//! SonarQube Web API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource clients (projects, favorites, hotspots, ...) build typed
//! builders on top of it by binding executor closures to endpoints.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::builder::Executor;
use crate::error::{Result, SonarError};
use crate::resources::{
    AlmIntegrationsClient, ComponentsClient, FavoritesClient, HotspotsClient, PluginsClient,
    ProjectsClient, WebhooksClient,
};

const DEFAULT_BASE_URL: &str = "http://localhost:9000";
const USER_AGENT: &str = concat!("sonarapi/", env!("CARGO_PKG_VERSION"));

/// Low-level SonarQube Web API client.
///
/// Handles authentication and HTTP requests. Typed operations are reached
/// through the per-resource clients, e.g. [`SonarClient::projects`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use sonarapi::SonarClient;
///
/// # async fn example() -> sonarapi::Result<()> {
/// // Create from environment variables
/// let client = SonarClient::from_env()?;
///
/// // Or configure manually
/// let client = SonarClient::new("your-token", "https://sonar.example.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SonarClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for SonarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SonarClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SONAR_TOKEN` for authentication and optionally `SONAR_URL`
    /// for the base URL (defaults to `http://localhost:9000`).
    ///
    /// # Errors
    ///
    /// Returns an error if `SONAR_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("SONAR_TOKEN").map_err(|_| {
            SonarError::ConfigMissing("SONAR_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("SONAR_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - SonarQube user token
    /// * `base_url` - Base URL of the SonarQube instance
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SonarError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Project administration and search.
    #[must_use]
    pub fn projects(&self) -> ProjectsClient {
        ProjectsClient::new(self.clone())
    }

    /// Component trees and lookups.
    #[must_use]
    pub fn components(&self) -> ComponentsClient {
        ComponentsClient::new(self.clone())
    }

    /// The authenticated user's favorite components.
    #[must_use]
    pub fn favorites(&self) -> FavoritesClient {
        FavoritesClient::new(self.clone())
    }

    /// Security hotspots.
    #[must_use]
    pub fn hotspots(&self) -> HotspotsClient {
        HotspotsClient::new(self.clone())
    }

    /// Webhooks and their delivery history.
    #[must_use]
    pub fn webhooks(&self) -> WebhooksClient {
        WebhooksClient::new(self.clone())
    }

    /// DevOps platform (ALM) integrations.
    #[must_use]
    pub fn alm_integrations(&self) -> AlmIntegrationsClient {
        AlmIntegrationsClient::new(self.clone())
    }

    /// Installed plugins.
    #[must_use]
    pub fn plugins(&self) -> PluginsClient {
        PluginsClient::new(self.clone())
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(SonarError::Http)?;

        Self::check_response(response).await
    }

    /// Make a POST request with a form-encoded body.
    ///
    /// The platform's write endpoints take `application/x-www-form-urlencoded`
    /// parameters rather than JSON bodies.
    #[tracing::instrument(skip(self, form))]
    pub async fn post_form<F: Serialize + ?Sized>(&self, path: &str, form: &F) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .form(form)
            .send()
            .await
            .map_err(SonarError::Http)?;

        Self::check_response(response).await
    }

    /// Build an executor that GETs `path` with the request serialized as
    /// query parameters and decodes the JSON response.
    pub(crate) fn get_executor<R, T>(&self, path: &'static str) -> Executor<R, T>
    where
        R: Serialize + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        Arc::new(
            move |request: R| -> futures::future::BoxFuture<'static, Result<T>> {
                let client = client.clone();
                Box::pin(async move {
                    let response = client.get_with_query(path, &request).await?;
                    response.json::<T>().await.map_err(SonarError::Http)
                })
            },
        )
    }

    /// Build an executor that POSTs `path` with the request serialized as
    /// form parameters and decodes the JSON response.
    pub(crate) fn post_executor<R, T>(&self, path: &'static str) -> Executor<R, T>
    where
        R: Serialize + Send + Sync + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        Arc::new(
            move |request: R| -> futures::future::BoxFuture<'static, Result<T>> {
                let client = client.clone();
                Box::pin(async move {
                    let response = client.post_form(path, &request).await?;
                    response.json::<T>().await.map_err(SonarError::Http)
                })
            },
        )
    }

    /// Build an executor for POST endpoints that respond with no body.
    pub(crate) fn post_unit_executor<R>(&self, path: &'static str) -> Executor<R, ()>
    where
        R: Serialize + Send + Sync + 'static,
    {
        let client = self.clone();
        Arc::new(
            move |request: R| -> futures::future::BoxFuture<'static, Result<()>> {
                let client = client.clone();
                Box::pin(async move {
                    client.post_form(path, &request).await?;
                    Ok(())
                })
            },
        )
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(SonarError::Unauthorized {
                status_code: status.as_u16(),
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(SonarError::Api {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error messages from a failed response.
    ///
    /// Error bodies look like `{"errors": [{"msg": "..."}, ...]}`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
                let msgs: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}
