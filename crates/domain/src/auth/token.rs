//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs. Expiry is checked here against an explicit clock
//! value with zero leeway instead of inside `jsonwebtoken`, so tests can pin
//! the time and a token is invalid from the second its `exp` is reached.

use chrono::{DateTime, Duration, Utc};
use common::CustomerId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Default token lifetime: seven days.
pub const DEFAULT_TTL_HOURS: i64 = 24 * 7;

/// Longest token lifetime the server accepts (five years).
pub const MAX_TTL_HOURS: i64 = 24 * 366 * 5;

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    ttl: Duration,
}

impl TokenConfig {
    /// Fails when the secret is shorter than [`MIN_SECRET_LEN`] bytes.
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }
        Ok(Self { secret, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Who a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub customer_id: CustomerId,
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Customer id.
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Token id, used for revocation.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The customer this token belongs to, if `sub` is a valid id.
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.sub.parse().ok()
    }
}

/// Issues and validates bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
            validation,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Issues a token valid from `now` until `now + ttl`.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: identity.customer_id.to_string(),
            email: identity.email.clone(),
            given_name: identity.given_name.clone(),
            family_name: identity.family_name.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Returns the claims of a well-formed, correctly signed token that has
    /// not expired at `now`. Every failure is `AuthError::InvalidToken`.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        if now.timestamp() >= data.claims.exp {
            tracing::debug!(exp = data.claims.exp, "Token expired");
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }

    pub fn issue_now(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue(identity, Utc::now())
    }

    pub fn validate_now(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate(token, Utc::now())
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
