//! Request and response bodies of the REST API.
//!
//! Request fields default to empty values so that a missing field reaches
//! the server's own validation (and its 400 response) instead of failing
//! JSON extraction.

use serde::{Deserialize, Serialize};

use crate::{AccountView, CustomerId, DeliveryInfo, Money, OrderId, OrderStatus, Profile, ProductId};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: CustomerId,
    pub token: String,
    pub user: AccountView,
}

/// Body of `/auth/refresh-token` and `/auth/logout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Registration body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Full-replacement body of `PUT /customers/{id}`.
///
/// A blank or absent password keeps the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub id: CustomerId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
}

/// One cart line as sent at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
}

/// Checkout body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub order_items: Vec<OrderLineRequest>,
    pub total_amount: Money,
    #[serde(flatten)]
    pub delivery: DeliveryInfo,
}

/// Full-replacement body of `PUT /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub id: OrderId,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub order_items: Vec<OrderLineRequest>,
    pub total_amount: Money,
    #[serde(flatten)]
    pub delivery: DeliveryInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
