use crate::domain::error::PaymentError;
use crate::domain::payment::Payment;
use crate::domain::webhook::Webhook;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Reversible transform for sensitive card data. The core never inspects
/// the opaque representation.
pub trait CardEncryption: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, PaymentError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, PaymentError>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn save(&self, payment: &Payment) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>>;
    async fn find_all(&self) -> Result<Vec<Payment>>;
    /// Newest-first page of payments, zero-indexed.
    async fn find_page(&self, page: u32, size: u32) -> Result<Vec<Payment>>;
    async fn count(&self) -> Result<u64>;
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait WebhookRegistry: Send + Sync {
    async fn save(&self, webhook: &Webhook) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>>;
    async fn find_all(&self) -> Result<Vec<Webhook>>;
    async fn find_all_active(&self) -> Result<Vec<Webhook>>;
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}
