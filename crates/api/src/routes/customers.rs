//! Customer account endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::api::{RegisterRequest, UpdateCustomerRequest};
use common::{AccountView, CustomerId};
use domain::{ProfileUpdate, Registration};
use store::Store;

use crate::AppState;
use crate::auth::AuthenticatedCustomer;
use crate::error::ApiError;

/// POST /customers — register a new account.
#[tracing::instrument(skip(state, body))]
pub async fn register<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    let Json(request) = body?;
    let account = state
        .auth
        .register(Registration {
            email: request.email,
            password: request.password,
            profile: request.profile,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /customers — all accounts.
#[tracing::instrument(skip(state, _caller))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
) -> Result<Json<Vec<AccountView>>, ApiError> {
    Ok(Json(state.auth.list_accounts().await?))
}

/// GET /customers/{id}
#[tracing::instrument(skip(state, _caller, id))]
pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    id: Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<AccountView>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.auth.get_account(id).await?))
}

/// GET /customers/email/{email}
#[tracing::instrument(skip(state, _caller, email))]
pub async fn get_by_email<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    _caller: AuthenticatedCustomer,
    email: Result<Path<String>, PathRejection>,
) -> Result<Json<AccountView>, ApiError> {
    let Path(email) = email?;
    state
        .auth
        .find_account_by_email(&email)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Customer not found: {email}")))
}

/// PUT /customers/{id} — replace the caller's own account fields.
///
/// Leaving the password out (or blank) keeps the current one.
#[tracing::instrument(skip(state, caller, id, body))]
pub async fn update<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    caller: AuthenticatedCustomer,
    id: Result<Path<CustomerId>, PathRejection>,
    body: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    if request.id != id {
        return Err(ApiError::BadRequest(format!(
            "Customer id in the body ({}) does not match the path ({id})",
            request.id
        )));
    }
    caller.ensure_self(id)?;

    state
        .auth
        .update_profile(
            id,
            ProfileUpdate {
                email: request.email,
                password: request.password,
                profile: request.profile,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /customers/{id} — delete the caller's own account and its orders.
#[tracing::instrument(skip(state, caller, id))]
pub async fn delete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    caller: AuthenticatedCustomer,
    id: Result<Path<CustomerId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    caller.ensure_self(id)?;
    state.auth.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
