use crate::domain::error::PaymentError;
use crate::domain::payment::{mask_card_number, Payment, PaymentStatus};
use crate::domain::ports::{CardEncryption, PaymentStore};
use crate::gateways::PaymentGateway;
use crate::service::webhook_dispatcher::{NotificationOutcome, WebhookDispatcher};
use anyhow::bail;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub card_number: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub masked_card_number: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = (total_elements as f64 / size.max(1) as f64).ceil() as u32;
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: page + 1 >= total_pages,
        }
    }
}

const FRAUD_SENTINEL: &str = "aaa";

/// Payment orchestrator: drives a payment through its state machine,
/// persisting after every transition and handing terminal events off to
/// the webhook dispatcher without blocking the caller.
#[derive(Clone)]
pub struct PaymentService {
    pub store: Arc<dyn PaymentStore>,
    pub encryption: Arc<dyn CardEncryption>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub dispatcher: WebhookDispatcher,
}

impl PaymentService {
    pub async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentResponse, PaymentError> {
        let encrypted_card_number = self.encryption.encrypt(&request.card_number)?;

        let mut payment = Payment::new(
            request.first_name,
            request.last_name,
            request.zip_code,
            encrypted_card_number,
            request.amount,
        );
        payment.validate()?;

        self.store.save(&payment).await?;

        if let Err(cause) = self.process(&mut payment).await {
            payment.mark_failed();
            if let Err(save_err) = self.store.save(&payment).await {
                tracing::error!(
                    "failed to persist FAILED status for payment {}: {save_err:#}",
                    payment.id
                );
            }

            let error = PaymentError::Processing(cause.to_string());
            self.notify_detached(
                payment.clone(),
                NotificationOutcome::Failed(error.to_string()),
            );
            return Err(error);
        }

        self.notify_detached(payment.clone(), NotificationOutcome::Created);

        Ok(to_response(&payment, mask_card_number(&request.card_number)))
    }

    /// Authorization phase: transition to PROCESSING, run the fraud rule
    /// and the gateway, then land on PROCESSED. Any error here sends the
    /// payment to FAILED in the caller.
    async fn process(&self, payment: &mut Payment) -> anyhow::Result<()> {
        payment.mark_processing();
        self.store.save(payment).await?;

        if payment.first_name == FRAUD_SENTINEL && payment.last_name == FRAUD_SENTINEL {
            bail!("Fraud detected");
        }

        let response = self.gateway.process(payment).await?;
        if !response.success {
            bail!(
                "Payment gateway error: {}",
                response.error_message.unwrap_or_default()
            );
        }
        tracing::info!(
            "payment {} authorized by {} gateway",
            payment.id,
            self.gateway.name()
        );

        payment.mark_processed();
        self.store.save(payment).await?;
        Ok(())
    }

    fn notify_detached(&self, payment: Payment, outcome: NotificationOutcome) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.notify(&payment, outcome).await;
        });
    }

    pub async fn get_payment(&self, id: Uuid) -> Result<PaymentResponse, PaymentError> {
        let payment = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(id))?;

        Ok(self.to_masked_response(&payment)?)
    }

    pub async fn list_payments(&self) -> Result<Vec<PaymentResponse>, PaymentError> {
        let payments = self.store.find_all().await?;
        payments
            .iter()
            .map(|payment| self.to_masked_response(payment))
            .collect()
    }

    pub async fn list_payments_paginated(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<PaymentResponse>, PaymentError> {
        let size = size.max(1);
        let payments = self.store.find_page(page, size).await?;
        let total_elements = self.store.count().await?;

        let content = payments
            .iter()
            .map(|payment| self.to_masked_response(payment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResponse::new(content, page, size, total_elements))
    }

    /// Decrypts the stored card reference only long enough to re-derive
    /// the masked display value.
    fn to_masked_response(&self, payment: &Payment) -> Result<PaymentResponse, PaymentError> {
        let card_number = self.encryption.decrypt(&payment.encrypted_card_number)?;
        Ok(to_response(payment, mask_card_number(&card_number)))
    }
}

fn to_response(payment: &Payment, masked_card_number: String) -> PaymentResponse {
    PaymentResponse {
        id: payment.id,
        first_name: payment.first_name.clone(),
        last_name: payment.last_name.clone(),
        zip_code: payment.zip_code.clone(),
        masked_card_number,
        amount: payment.amount,
        status: payment.status(),
        created_at: payment.created_at,
    }
}
