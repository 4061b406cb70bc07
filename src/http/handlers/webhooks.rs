use crate::domain::error::PaymentError;
use crate::service::webhook_service::RegisterWebhookRequest;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

pub async fn register_webhook(
    State(state): State<AppState>,
    Json(request): Json<RegisterWebhookRequest>,
) -> Result<Response, PaymentError> {
    let response = state.webhook_service.register_webhook(request).await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub async fn get_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PaymentError> {
    let response = state.webhook_service.get_webhook(id).await?;
    Ok(Json(response).into_response())
}

pub async fn list_webhooks(State(state): State<AppState>) -> Result<Response, PaymentError> {
    let response = state.webhook_service.list_webhooks().await?;
    Ok(Json(response).into_response())
}

pub async fn delete_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PaymentError> {
    state.webhook_service.delete_webhook(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn activate_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PaymentError> {
    let response = state.webhook_service.activate_webhook(id).await?;
    Ok(Json(response).into_response())
}

pub async fn deactivate_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PaymentError> {
    let response = state.webhook_service.deactivate_webhook(id).await?;
    Ok(Json(response).into_response())
}
