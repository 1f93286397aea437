//! Login state of the shopper.

use common::api::LoginResponse;
use common::{AccountView, CustomerId};
use serde::{Deserialize, Serialize};

/// Bearer token and account of the logged-in shopper.
///
/// A session is dropped as soon as the server answers 401; the shopper then
/// has to log in again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    token: Option<String>,
    user_id: Option<CustomerId>,
    user: Option<AccountView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session created from a successful login.
    pub fn from_login(login: LoginResponse) -> Self {
        Self {
            token: Some(login.token),
            user_id: Some(login.user_id),
            user: Some(login.user),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.user_id
    }

    pub fn user(&self) -> Option<&AccountView> {
        self.user.as_ref()
    }

    /// Swaps in a refreshed token.
    pub fn replace_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user_id = None;
        self.user = None;
    }
}
