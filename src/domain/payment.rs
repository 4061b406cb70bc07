use crate::domain::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Processed,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Processed | PaymentStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Processed => "PROCESSED",
            PaymentStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PROCESSING" => Ok(PaymentStatus::Processing),
            "PROCESSED" => Ok(PaymentStatus::Processed),
            "FAILED" => Ok(PaymentStatus::Failed),
            other => Err(anyhow::anyhow!("unknown payment status: {other}")),
        }
    }
}

/// Payment entity. All fields are fixed at construction except `status`,
/// which only moves forward through the `mark_*` transitions.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub encrypted_card_number: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    status: PaymentStatus,
}

impl Payment {
    pub fn new(
        first_name: String,
        last_name: String,
        zip_code: String,
        encrypted_card_number: String,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            zip_code,
            encrypted_card_number,
            amount,
            created_at: Utc::now(),
            status: PaymentStatus::Pending,
        }
    }

    /// Rebuilds a persisted payment. Storage adapters only.
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: Uuid,
        first_name: String,
        last_name: String,
        zip_code: String,
        encrypted_card_number: String,
        amount: Decimal,
        created_at: DateTime<Utc>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            zip_code,
            encrypted_card_number,
            amount,
            created_at,
            status,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// First invalid field wins, checked in a fixed order.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.first_name.trim().is_empty() {
            return Err(PaymentError::Validation("First name is required".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(PaymentError::Validation("Last name is required".into()));
        }
        if self.zip_code.trim().is_empty() {
            return Err(PaymentError::Validation("Zip code is required".into()));
        }
        if self.encrypted_card_number.trim().is_empty() {
            return Err(PaymentError::Validation("Card number is required".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(PaymentError::Validation(
                "Amount must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn mark_processing(&mut self) {
        if self.status == PaymentStatus::Pending {
            self.status = PaymentStatus::Processing;
        }
    }

    pub fn mark_processed(&mut self) {
        if !self.status.is_terminal() {
            self.status = PaymentStatus::Processed;
        }
    }

    pub fn mark_failed(&mut self) {
        if !self.status.is_terminal() {
            self.status = PaymentStatus::Failed;
        }
    }
}

/// Masks a card number for display, keeping only the last four characters.
pub fn mask_card_number(card_number: &str) -> String {
    let len = card_number.chars().count();
    if len < 4 {
        return "****".to_string();
    }
    let last_four: String = card_number.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), last_four)
}
