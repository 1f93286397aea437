//! Bearer token extractor.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use common::CustomerId;
use domain::{AuthError, Claims, extract_bearer};
use store::Store;

use crate::AppState;
use crate::error::ApiError;

/// The customer a request's bearer token was issued to.
///
/// Handlers that take this extractor reject requests without a valid,
/// unrevoked token with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    pub customer_id: CustomerId,
    pub claims: Claims,
}

impl AuthenticatedCustomer {
    /// Allows the request only when it acts on the caller's own account.
    pub fn ensure_self(&self, customer_id: CustomerId) -> Result<(), ApiError> {
        if self.customer_id == customer_id {
            Ok(())
        } else {
            tracing::warn!(
                caller = %self.customer_id,
                target = %customer_id,
                "request for another customer's data"
            );
            Err(ApiError::Forbidden(
                "Je hebt geen toegang tot deze gegevens.".to_string(),
            ))
        }
    }
}

impl<S: Store> FromRequestParts<Arc<AppState<S>>> for AuthenticatedCustomer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(customer) = parts.extensions.get::<AuthenticatedCustomer>() {
            return Ok(customer.clone());
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer)
            .ok_or_else(|| {
                tracing::debug!(uri = %parts.uri, "missing bearer token");
                ApiError::Unauthorized(AuthError::MissingToken.to_string())
            })?
            .to_string();

        let claims = state.auth.authenticate(&token).await.map_err(|e| {
            tracing::debug!(uri = %parts.uri, error = %e, "bearer token rejected");
            ApiError::from(e)
        })?;
        let customer_id = claims
            .customer_id()
            .ok_or_else(|| ApiError::from(AuthError::InvalidToken))?;

        let customer = AuthenticatedCustomer {
            customer_id,
            claims,
        };
        parts.extensions.insert(customer.clone());
        Ok(customer)
    }
}
