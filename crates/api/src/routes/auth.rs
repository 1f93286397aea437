//! Login, token refresh and logout endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use common::api::{LoginRequest, LoginResponse, TokenRequest, TokenResponse};
use store::Store;

use crate::AppState;
use crate::error::ApiError;

/// POST /auth/login — exchange email and password for a bearer token.
#[tracing::instrument(skip(state, body))]
pub async fn login<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body?;
    let outcome = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        user_id: outcome.account.id,
        token: outcome.token,
        user: outcome.account,
    }))
}

/// POST /auth/refresh-token — a fresh token for a still-valid one.
#[tracing::instrument(skip(state, body))]
pub async fn refresh<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = body?;
    let token = state.auth.refresh(&request.token).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /auth/logout — revoke a token until it expires.
#[tracing::instrument(skip(state, body))]
pub async fn logout<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body?;
    state.auth.logout(&request.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
