use crate::domain::payment::Payment;
use crate::gateways::{GatewayResponse, PaymentGateway};
use anyhow::Result;
use uuid::Uuid;

const BLOCKED_ZIP_CODE: &str = "11111";

/// Simulated authorization gateway with a fixed, deterministic rule:
/// every payment succeeds unless its zip code is the blocked sentinel.
pub struct SimpleGateway;

#[async_trait::async_trait]
impl PaymentGateway for SimpleGateway {
    fn name(&self) -> &'static str {
        "simple"
    }

    async fn process(&self, payment: &Payment) -> Result<GatewayResponse> {
        tracing::info!(
            "processing payment {} for {} {} with zip code {}",
            payment.id,
            payment.first_name,
            payment.last_name,
            payment.zip_code
        );

        if payment.zip_code == BLOCKED_ZIP_CODE {
            tracing::warn!("payment {} rejected: blocked zip code", payment.id);
            return Ok(GatewayResponse::failure("blocked zip code".to_string()));
        }

        let transaction_id = format!("TXN-{}", Uuid::new_v4());
        tracing::info!("payment {} authorized as {}", payment.id, transaction_id);
        Ok(GatewayResponse::success(transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment_with_zip(zip: &str) -> Payment {
        Payment::new(
            "John".into(),
            "Doe".into(),
            zip.into(),
            "opaque".into(),
            dec!(25.00),
        )
    }

    #[tokio::test]
    async fn authorizes_normal_zip_codes() {
        let response = SimpleGateway.process(&payment_with_zip("90210")).await.unwrap();
        assert!(response.success);
        assert!(response.transaction_id.unwrap().starts_with("TXN-"));
        assert_eq!(SimpleGateway.name(), "simple");
    }

    #[tokio::test]
    async fn rejects_blocked_zip_code() {
        let response = SimpleGateway.process(&payment_with_zip("11111")).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some("blocked zip code"));
    }
}
