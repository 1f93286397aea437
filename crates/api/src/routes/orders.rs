//! Order endpoints: checkout, reads, replacement, status changes.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::api::{PlaceOrderRequest, UpdateOrderRequest};
use common::{CustomerId, Order, OrderId, OrderStatus};
use store::Store;

use crate::AppState;
use crate::auth::AuthenticatedCustomer;
use crate::error::ApiError;

/// POST /orders — place an order for the caller from a cart snapshot.
#[tracing::instrument(skip(state, caller, body), fields(customer_id = %caller.customer_id))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    caller: AuthenticatedCustomer,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(request) = body?;
    caller.ensure_self(request.customer_id)?;

    let order = state.orders.place_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders — every order, oldest first.
#[tracing::instrument(skip(state, _caller))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.get_all().await?))
}

/// GET /orders/{id} — one order with its customer and lines.
#[tracing::instrument(skip(state, _caller, id))]
pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    id: Result<Path<OrderId>, PathRejection>,
) -> Result<Json<Order>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.orders.get_by_id(id).await?))
}

/// GET /orders/customer/{id} — a customer's orders, oldest first.
#[tracing::instrument(skip(state, _caller, customer_id))]
pub async fn list_for_customer<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    customer_id: Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let Path(customer_id) = customer_id?;
    Ok(Json(state.orders.get_by_customer(customer_id).await?))
}

/// PUT /orders/{id} — replace delivery data, total and lines.
#[tracing::instrument(skip(state, _caller, id, body))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    id: Result<Path<OrderId>, PathRejection>,
    body: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    state.orders.update_order(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /orders/{id}/status — move an order along the status table.
///
/// The body is the status name, either bare (`Shipped`) or as a JSON
/// string (`"Shipped"`).
#[tracing::instrument(skip(state, _caller, id, body))]
pub async fn update_status<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    id: Result<Path<OrderId>, PathRejection>,
    body: String,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let status = parse_status(&body)?;
    state.orders.update_status(id, status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /orders/{id}
#[tracing::instrument(skip(state, _caller, id))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    id: Result<Path<OrderId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_status(body: &str) -> Result<OrderStatus, ApiError> {
    let trimmed = body.trim();
    let name = match serde_json::from_str::<String>(trimmed) {
        Ok(name) => name,
        Err(_) => trimmed.to_string(),
    };
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("Status is verplicht.".to_string()));
    }
    name.trim()
        .parse()
        .map_err(|e: common::ParseStatusError| ApiError::BadRequest(e.to_string()))
}
