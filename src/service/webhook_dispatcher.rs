use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::WebhookRegistry;
use crate::service::retry::{retry_with_backoff, RetryPolicy};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum NotificationOutcome {
    Created,
    Failed(String),
}

/// Wire payload posted to every active subscriber endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEventPayload {
    pub payment_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PaymentEventPayload {
    fn from_payment(payment: &Payment, outcome: &NotificationOutcome) -> Self {
        let (event_type, error_message) = match outcome {
            NotificationOutcome::Created => ("payment.created", None),
            NotificationOutcome::Failed(message) => ("payment.failed", Some(message.clone())),
        };

        Self {
            payment_id: payment.id,
            first_name: payment.first_name.clone(),
            last_name: payment.last_name.clone(),
            zip_code: payment.zip_code.clone(),
            amount: payment.amount,
            status: payment.status(),
            created_at: payment.created_at,
            event_type: event_type.to_string(),
            error_message,
        }
    }
}

/// Fans one payment event out to every active subscriber. Each endpoint
/// gets its own detached task with independent retry state; exhausted
/// retries are logged and dropped, never surfaced to the caller.
#[derive(Clone)]
pub struct WebhookDispatcher {
    pub registry: Arc<dyn WebhookRegistry>,
    pub client: reqwest::Client,
    pub retry: RetryPolicy,
}

impl WebhookDispatcher {
    pub fn new(registry: Arc<dyn WebhookRegistry>) -> Self {
        Self {
            registry,
            client: reqwest::Client::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub async fn notify(&self, payment: &Payment, outcome: NotificationOutcome) {
        // the subscriber list is read once; later registry changes do not
        // affect a fan-out already underway
        let hooks = match self.registry.find_all_active().await {
            Ok(hooks) => hooks,
            Err(err) => {
                tracing::error!(
                    "failed to load active webhooks for payment {}: {err:#}",
                    payment.id
                );
                return;
            }
        };

        if hooks.is_empty() {
            tracing::info!("no active webhooks to notify for payment {}", payment.id);
            return;
        }

        let payload = PaymentEventPayload::from_payment(payment, &outcome);

        for hook in hooks {
            let client = self.client.clone();
            let retry = self.retry.clone();
            let payload = payload.clone();
            let url = hook.endpoint_url;
            let payment_id = payment.id;

            tokio::spawn(async move {
                match deliver(&client, &retry, &url, &payload).await {
                    Ok(()) => {
                        tracing::info!("webhook delivered to {url} for payment {payment_id}")
                    }
                    Err(err) => tracing::error!(
                        "webhook delivery to {url} failed for payment {payment_id}: {err:#}"
                    ),
                }
            });
        }
    }
}

async fn deliver(
    client: &reqwest::Client,
    retry: &RetryPolicy,
    url: &str,
    payload: &PaymentEventPayload,
) -> Result<()> {
    retry_with_backoff(retry, |attempt| {
        let client = client.clone();
        let payload = payload.clone();
        let url = url.to_string();
        async move {
            tracing::debug!("webhook attempt {attempt} to {url}");
            let response = client.post(&url).json(&payload).send().await?;
            response.error_for_status()?;
            Ok(())
        }
    })
    .await
}
