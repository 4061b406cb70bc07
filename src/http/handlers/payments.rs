use crate::domain::error::PaymentError;
use crate::service::payment_service::CreatePaymentRequest;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Response, PaymentError> {
    let response = state.payment_service.create_payment(request).await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PaymentError> {
    let response = state.payment_service.get_payment(id).await?;
    Ok(Json(response).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, PaymentError> {
    match (params.page, params.size) {
        (Some(page), Some(size)) => {
            let response = state
                .payment_service
                .list_payments_paginated(page, size)
                .await?;
            Ok(Json(response).into_response())
        }
        _ => {
            let response = state.payment_service.list_payments().await?;
            Ok(Json(response).into_response())
        }
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
