use crate::domain::payment::Payment;
use anyhow::Result;

pub mod simple;

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub error_message: Option<String>,
}

impl GatewayResponse {
    pub fn success(transaction_id: String) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            error_message: None,
        }
    }

    pub fn failure(error_message: String) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error_message: Some(error_message),
        }
    }
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(&self, payment: &Payment) -> Result<GatewayResponse>;
}
