use crate::domain::error::PaymentError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registered webhook endpoint. Only active endpoints receive event payloads.
#[derive(Debug, Clone)]
pub struct Webhook {
    pub id: Uuid,
    pub endpoint_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Webhook {
    pub fn new(endpoint_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            endpoint_url,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rehydrate(
        id: Uuid,
        endpoint_url: String,
        active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            endpoint_url,
            active,
            created_at,
            updated_at,
        }
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(PaymentError::Validation("Endpoint URL is required".into()));
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(PaymentError::Validation(
                "Endpoint URL must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(Webhook::new("https://example.com/hook".into()).validate().is_ok());
        assert!(Webhook::new("http://localhost:8080/hook".into()).validate().is_ok());
    }

    #[test]
    fn rejects_empty_or_schemeless_urls() {
        assert!(Webhook::new("".into()).validate().is_err());
        assert!(Webhook::new("ftp://example.com".into()).validate().is_err());
        assert!(Webhook::new("example.com/hook".into()).validate().is_err());
    }

    #[test]
    fn toggling_active_touches_updated_at() {
        let mut hook = Webhook::new("https://example.com/hook".into());
        assert!(hook.active);
        let before = hook.updated_at;
        hook.deactivate();
        assert!(!hook.active);
        assert!(hook.updated_at >= before);
        hook.activate();
        assert!(hook.active);
    }
}
