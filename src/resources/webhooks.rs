//! Webhooks and their delivery history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::builder::{ApiRequest, PagedBuilder, PagedRequest, RequestBuilder};
use crate::client::SonarClient;
use crate::error::{Result, SonarError};
use crate::pagination::{PageMeta, PagedResponse, Paging};

/// A configured webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// The webhook key.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Target URL notified on analysis completion.
    pub url: String,

    /// Whether a signing secret is configured.
    #[serde(default)]
    pub has_secret: bool,
}

/// One attempted delivery of a webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDelivery {
    /// The delivery id.
    pub id: String,

    /// Key of the analyzed component.
    #[serde(default)]
    pub component_key: Option<String>,

    /// Name of the webhook at delivery time.
    #[serde(default)]
    pub name: Option<String>,

    /// URL the payload was sent to.
    #[serde(default)]
    pub url: Option<String>,

    /// When the delivery was attempted.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,

    /// Whether the target acknowledged the payload.
    #[serde(default)]
    pub success: bool,

    /// HTTP status returned by the target, if it responded.
    #[serde(default)]
    pub http_status: Option<u16>,

    /// Round-trip duration in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Client for `api/webhooks` endpoints.
pub struct WebhooksClient {
    client: SonarClient,
}

impl WebhooksClient {
    pub(crate) fn new(client: SonarClient) -> Self {
        Self { client }
    }

    /// List configured webhooks (not paginated).
    #[must_use]
    pub fn list(&self) -> ListWebhooksBuilder {
        RequestBuilder::new(
            ListWebhooksRequest::default(),
            self.client.get_executor("api/webhooks/list"),
        )
    }

    /// Create a webhook.
    #[must_use]
    pub fn create(&self) -> CreateWebhookBuilder {
        RequestBuilder::new(
            CreateWebhookRequest::default(),
            self.client.post_executor("api/webhooks/create"),
        )
    }

    /// Delete a webhook.
    #[must_use]
    pub fn delete(&self) -> DeleteWebhookBuilder {
        RequestBuilder::new(
            DeleteWebhookRequest::default(),
            self.client.post_unit_executor("api/webhooks/delete"),
        )
    }

    /// Browse delivery history (paginated).
    #[must_use]
    pub fn deliveries(&self) -> WebhookDeliveriesBuilder {
        PagedBuilder::new(
            WebhookDeliveriesRequest::default(),
            self.client.get_executor("api/webhooks/deliveries"),
        )
    }
}

/// Builder for `api/webhooks/list`.
pub type ListWebhooksBuilder = RequestBuilder<ListWebhooksRequest, ListWebhooksResponse>;

/// Query parameters for `api/webhooks/list`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListWebhooksRequest {
    /// Restrict to a project's webhooks; global webhooks otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl ApiRequest for ListWebhooksRequest {}

impl ListWebhooksBuilder {
    /// Restrict to a project's webhooks.
    #[must_use]
    pub fn project(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.project = Some(key.into()))
    }
}

/// Response of `api/webhooks/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListWebhooksResponse {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

/// Builder for `api/webhooks/create`.
pub type CreateWebhookBuilder = RequestBuilder<CreateWebhookRequest, CreateWebhookResponse>;

/// Parameters for `api/webhooks/create`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWebhookRequest {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Target URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Attach to a project; global otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Signing secret for payload verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl ApiRequest for CreateWebhookRequest {
    fn validate(&self) -> Result<()> {
        if self.name.is_none() {
            return Err(SonarError::Validation(
                "'name' is required to create a webhook".to_string(),
            ));
        }
        if self.url.is_none() {
            return Err(SonarError::Validation(
                "'url' is required to create a webhook".to_string(),
            ));
        }
        Ok(())
    }
}

impl CreateWebhookBuilder {
    /// Display name (required).
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.modify(|r| r.name = Some(name.into()))
    }

    /// Target URL (required).
    #[must_use]
    pub fn url(self, url: impl Into<String>) -> Self {
        self.modify(|r| r.url = Some(url.into()))
    }

    /// Attach to a project.
    #[must_use]
    pub fn project(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.project = Some(key.into()))
    }

    /// Signing secret.
    #[must_use]
    pub fn secret(self, secret: impl Into<String>) -> Self {
        self.modify(|r| r.secret = Some(secret.into()))
    }
}

/// Response of `api/webhooks/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebhookResponse {
    /// The created webhook.
    pub webhook: Webhook,
}

/// Builder for `api/webhooks/delete`.
pub type DeleteWebhookBuilder = RequestBuilder<DeleteWebhookRequest, ()>;

/// Parameters for `api/webhooks/delete`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteWebhookRequest {
    /// Key of the webhook to delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

impl ApiRequest for DeleteWebhookRequest {
    fn validate(&self) -> Result<()> {
        if self.webhook.is_none() {
            return Err(SonarError::Validation(
                "'webhook' is required to delete a webhook".to_string(),
            ));
        }
        Ok(())
    }
}

impl DeleteWebhookBuilder {
    /// Key of the webhook to delete (required).
    #[must_use]
    pub fn webhook(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.webhook = Some(key.into()))
    }
}

/// Builder for `api/webhooks/deliveries`.
pub type WebhookDeliveriesBuilder =
    PagedBuilder<WebhookDeliveriesRequest, WebhookDeliveriesResponse>;

/// Query parameters for `api/webhooks/deliveries`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDeliveriesRequest {
    /// Filter by analyzed component key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_key: Option<String>,

    /// Filter by webhook key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
}

impl ApiRequest for WebhookDeliveriesRequest {}

impl PagedRequest for WebhookDeliveriesRequest {
    fn set_page(&mut self, page: u32) {
        self.p = Some(page);
    }
    fn set_page_size(&mut self, page_size: u32) {
        self.ps = Some(page_size);
    }
}

impl WebhookDeliveriesBuilder {
    /// Filter by analyzed component key.
    #[must_use]
    pub fn component_key(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.component_key = Some(key.into()))
    }

    /// Filter by webhook key.
    #[must_use]
    pub fn webhook(self, key: impl Into<String>) -> Self {
        self.modify(|r| r.webhook = Some(key.into()))
    }
}

/// One page of delivery history.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookDeliveriesResponse {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: Option<bool>,
    #[serde(default)]
    pub deliveries: Vec<WebhookDelivery>,
}

impl PagedResponse for WebhookDeliveriesResponse {
    type Item = WebhookDelivery;

    fn page_meta(&self) -> PageMeta {
        PageMeta::from_parts(self.paging.clone(), self.is_last_page)
    }

    fn into_items(self) -> Vec<WebhookDelivery> {
        self.deliveries
    }
}
