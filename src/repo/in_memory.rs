use crate::domain::payment::Payment;
use crate::domain::ports::{PaymentStore, WebhookRegistry};
use crate::domain::webhook::Webhook;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory payment store for tests. Keeps insertion order and counts
/// every save so tests can assert on write amplification.
#[derive(Default)]
pub struct InMemoryPaymentStore {
    payments: Mutex<Vec<Payment>>,
    saves: AtomicUsize,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn save(&self, payment: &Payment) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut payments = self.payments.lock().expect("payments lock");
        match payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => *existing = payment.clone(),
            None => payments.push(payment.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let payments = self.payments.lock().expect("payments lock");
        Ok(payments.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.lock().expect("payments lock");
        Ok(payments.iter().rev().cloned().collect())
    }

    async fn find_page(&self, page: u32, size: u32) -> Result<Vec<Payment>> {
        let payments = self.payments.lock().expect("payments lock");
        Ok(payments
            .iter()
            .rev()
            .skip(page as usize * size as usize)
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        let payments = self.payments.lock().expect("payments lock");
        Ok(payments.len() as u64)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut payments = self.payments.lock().expect("payments lock");
        payments.retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryWebhookRegistry {
    webhooks: Mutex<Vec<Webhook>>,
}

impl InMemoryWebhookRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookRegistry for InMemoryWebhookRegistry {
    async fn save(&self, webhook: &Webhook) -> Result<()> {
        let mut webhooks = self.webhooks.lock().expect("webhooks lock");
        match webhooks.iter_mut().find(|w| w.id == webhook.id) {
            Some(existing) => *existing = webhook.clone(),
            None => webhooks.push(webhook.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>> {
        let webhooks = self.webhooks.lock().expect("webhooks lock");
        Ok(webhooks.iter().find(|w| w.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Webhook>> {
        let webhooks = self.webhooks.lock().expect("webhooks lock");
        Ok(webhooks.clone())
    }

    async fn find_all_active(&self) -> Result<Vec<Webhook>> {
        let webhooks = self.webhooks.lock().expect("webhooks lock");
        Ok(webhooks.iter().filter(|w| w.active).cloned().collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut webhooks = self.webhooks.lock().expect("webhooks lock");
        webhooks.retain(|w| w.id != id);
        Ok(())
    }
}
