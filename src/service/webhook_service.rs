use crate::domain::error::PaymentError;
use crate::domain::ports::WebhookRegistry;
use crate::domain::webhook::Webhook;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWebhookRequest {
    pub endpoint_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub id: Uuid,
    pub endpoint_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Webhook registration use case: subscriber endpoints consumed read-only
/// by the dispatcher are managed here.
#[derive(Clone)]
pub struct WebhookService {
    pub registry: Arc<dyn WebhookRegistry>,
}

impl WebhookService {
    pub async fn register_webhook(
        &self,
        request: RegisterWebhookRequest,
    ) -> Result<WebhookResponse, PaymentError> {
        let webhook = Webhook::new(request.endpoint_url);
        webhook.validate()?;

        self.registry.save(&webhook).await?;
        Ok(to_response(&webhook))
    }

    pub async fn get_webhook(&self, id: Uuid) -> Result<WebhookResponse, PaymentError> {
        let webhook = self.find(id).await?;
        Ok(to_response(&webhook))
    }

    pub async fn list_webhooks(&self) -> Result<Vec<WebhookResponse>, PaymentError> {
        let webhooks = self.registry.find_all().await?;
        Ok(webhooks.iter().map(to_response).collect())
    }

    pub async fn delete_webhook(&self, id: Uuid) -> Result<(), PaymentError> {
        self.find(id).await?;
        self.registry.delete_by_id(id).await?;
        Ok(())
    }

    pub async fn activate_webhook(&self, id: Uuid) -> Result<WebhookResponse, PaymentError> {
        let mut webhook = self.find(id).await?;
        webhook.activate();
        self.registry.save(&webhook).await?;
        Ok(to_response(&webhook))
    }

    pub async fn deactivate_webhook(&self, id: Uuid) -> Result<WebhookResponse, PaymentError> {
        let mut webhook = self.find(id).await?;
        webhook.deactivate();
        self.registry.save(&webhook).await?;
        Ok(to_response(&webhook))
    }

    async fn find(&self, id: Uuid) -> Result<Webhook, PaymentError> {
        self.registry
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::WebhookNotFound(id))
    }
}

fn to_response(webhook: &Webhook) -> WebhookResponse {
    WebhookResponse {
        id: webhook.id,
        endpoint_url: webhook.endpoint_url.clone(),
        active: webhook.active,
        created_at: webhook.created_at,
        updated_at: webhook.updated_at,
    }
}
