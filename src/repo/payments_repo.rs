use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::PaymentStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

fn map_row(row: PgRow) -> Result<Payment> {
    let status: String = row.get("status");
    Ok(Payment::rehydrate(
        row.get("id"),
        row.get("first_name"),
        row.get("last_name"),
        row.get("zip_code"),
        row.get("encrypted_card_number"),
        row.get::<Decimal, _>("amount"),
        row.get::<DateTime<Utc>, _>("created_at"),
        PaymentStatus::parse(&status)?,
    ))
}

#[async_trait]
impl PaymentStore for PaymentsRepo {
    async fn save(&self, payment: &Payment) -> Result<()> {
        // status transitions re-save the same row
        sqlx::query(
            r#"
            INSERT INTO payments (id, first_name, last_name, zip_code, encrypted_card_number, amount, created_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET status = EXCLUDED.status
            "#,
        )
        .bind(payment.id)
        .bind(&payment.first_name)
        .bind(&payment.last_name)
        .bind(&payment.zip_code)
        .bind(&payment.encrypted_card_number)
        .bind(payment.amount)
        .bind(payment.created_at)
        .bind(payment.status().as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, zip_code, encrypted_card_number, amount, created_at, status
             FROM payments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, zip_code, encrypted_card_number, amount, created_at, status
             FROM payments ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_row).collect()
    }

    async fn find_page(&self, page: u32, size: u32) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, zip_code, encrypted_card_number, amount, created_at, status
             FROM payments ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(size as i64)
        .bind(page as i64 * size as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_row).collect()
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM payments")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.get("total");
        Ok(total as u64)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
