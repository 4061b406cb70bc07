use crate::domain::ports::WebhookRegistry;
use crate::domain::webhook::Webhook;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct WebhookRepo {
    pub pool: PgPool,
}

fn map_row(row: PgRow) -> Webhook {
    Webhook::rehydrate(
        row.get("id"),
        row.get("endpoint_url"),
        row.get("active"),
        row.get::<DateTime<Utc>, _>("created_at"),
        row.get::<DateTime<Utc>, _>("updated_at"),
    )
}

#[async_trait]
impl WebhookRegistry for WebhookRepo {
    async fn save(&self, webhook: &Webhook) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO webhooks (id, endpoint_url, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET active = EXCLUDED.active, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(webhook.id)
        .bind(&webhook.endpoint_url)
        .bind(webhook.active)
        .bind(webhook.created_at)
        .bind(webhook.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>> {
        let row = sqlx::query(
            "SELECT id, endpoint_url, active, created_at, updated_at FROM webhooks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_row))
    }

    async fn find_all(&self) -> Result<Vec<Webhook>> {
        let rows = sqlx::query(
            "SELECT id, endpoint_url, active, created_at, updated_at FROM webhooks ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn find_all_active(&self) -> Result<Vec<Webhook>> {
        let rows = sqlx::query(
            "SELECT id, endpoint_url, active, created_at, updated_at FROM webhooks WHERE active = true ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM webhooks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
