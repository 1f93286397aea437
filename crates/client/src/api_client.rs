//! HTTP client for the storefront API.

use std::time::Duration;

use async_trait::async_trait;
use common::api::{
    ErrorBody, LoginRequest, LoginResponse, PlaceOrderRequest, RegisterRequest, TokenRequest,
    TokenResponse,
};
use common::{AccountView, CustomerId, Order, OrderId};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::session::Session;

/// Sends a checkout to the server.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(
        &self,
        token: &str,
        request: &PlaceOrderRequest,
    ) -> Result<Order, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("storefront-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/auth/login")).json(&body).send().await?;
        read_json(response).await
    }

    /// Logs in and returns the resulting session.
    pub async fn start_session(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        Ok(Session::from_login(self.login(email, password).await?))
    }

    pub async fn refresh_token(&self, token: &str) -> Result<String, ClientError> {
        let body = TokenRequest {
            token: token.to_string(),
        };
        let response = self
            .http
            .post(self.url("/auth/refresh-token"))
            .json(&body)
            .send()
            .await?;
        let refreshed: TokenResponse = read_json(response).await?;
        Ok(refreshed.token)
    }

    /// Refreshes the session's token. A rejected token ends the session.
    pub async fn refresh_session(&self, session: &mut Session) -> Result<(), ClientError> {
        let token = session.token().ok_or(ClientError::NotLoggedIn)?.to_string();
        match self.refresh_token(&token).await {
            Ok(fresh) => {
                session.replace_token(fresh);
                Ok(())
            }
            Err(e) => {
                if e.is_unauthorized() {
                    session.clear();
                }
                Err(e)
            }
        }
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let body = TokenRequest {
            token: token.to_string(),
        };
        let response = self.http.post(self.url("/auth/logout")).json(&body).send().await?;
        expect_success(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AccountView, ClientError> {
        let response = self.http.post(self.url("/customers")).json(request).send().await?;
        read_json(response).await
    }

    pub async fn get_customer(
        &self,
        token: &str,
        id: CustomerId,
    ) -> Result<AccountView, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/customers/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn get_order(&self, token: &str, id: OrderId) -> Result<Order, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/orders/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn get_customer_orders(
        &self,
        token: &str,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/orders/customer/{customer_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    #[tracing::instrument(skip(self, token, request), fields(lines = request.order_items.len()))]
    async fn place_order(
        &self,
        token: &str,
        request: &PlaceOrderRequest,
    ) -> Result<Order, ClientError> {
        let response = self
            .http
            .post(self.url("/orders"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(error_from(response).await)
    }
}

async fn expect_success(response: Response) -> Result<(), ClientError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    tracing::debug!(status = status.as_u16(), %message, "API request failed");
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
