//! Login, token refresh, logout, registration and profile updates.

use chrono::Utc;
use common::{AccountView, CustomerId, Profile};
use store::{AccountRecord, AccountUpdate, CustomerStore, NewAccount, StoreError};

use crate::error::AuthError;

use super::{Claims, Identity, PasswordHasher, RevocationList, TokenService};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account: AccountView,
}

/// Input for creating an account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

/// Full replacement of an account's editable fields.
///
/// `password: None` (or blank) keeps the stored hash.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: String,
    pub password: Option<String>,
    pub profile: Profile,
}

/// Service for accounts and bearer credentials.
#[derive(Clone)]
pub struct AuthService<S: CustomerStore> {
    store: S,
    hasher: PasswordHasher,
    tokens: TokenService,
    revoked: RevocationList,
}

impl<S: CustomerStore> AuthService<S> {
    pub fn new(store: S, tokens: TokenService) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            tokens,
            revoked: RevocationList::new(),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn revocations(&self) -> &RevocationList {
        &self.revoked
    }

    /// Checks credentials and issues a token.
    ///
    /// An unknown email and a wrong password produce the same error.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let account = match self.store.find_account_by_email(email).await? {
            Some(account) if self.verify_password(password, &account.password_hash).await? => {
                account
            }
            _ => {
                metrics::counter!("auth_logins_total", "outcome" => "rejected").increment(1);
                tracing::info!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if self.hasher.needs_rehash(&account.password_hash) {
            self.upgrade_hash(account.id, password).await;
        }

        let token = self.tokens.issue_now(&identity_of(&account))?;
        metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);
        tracing::info!(customer_id = %account.id, "Login succeeded");

        Ok(LoginOutcome {
            token,
            account: account.view(),
        })
    }

    /// Issues a fresh token for the subject of a still-valid one. The old
    /// token stays valid until its own expiry.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, token: &str) -> Result<String, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let result = self.refresh_inner(token).await;
        let outcome = if result.is_ok() { "success" } else { "rejected" };
        metrics::counter!("auth_refresh_total", "outcome" => outcome).increment(1);
        result
    }

    async fn refresh_inner(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.authenticate(token).await?;
        let customer_id = claims.customer_id().ok_or(AuthError::InvalidToken)?;
        let account = self
            .store
            .get_account(customer_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        self.tokens.issue_now(&identity_of(&account))
    }

    /// Revokes a valid token until its expiry.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self.authenticate(token).await?;
        self.revoked.revoke(&claims.jti, claims.exp, Utc::now()).await;
        tracing::info!(subject = %claims.sub, "Token revoked");
        Ok(())
    }

    /// Validates a bearer token and checks it was not logged out.
    pub async fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let now = Utc::now();
        let claims = self.tokens.validate(token, now)?;
        if self.revoked.is_revoked(&claims.jti, now).await {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Creates an account with a freshly hashed password.
    #[tracing::instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<AccountView, AuthError> {
        let email = registration.email.trim().to_string();
        if email.is_empty() || registration.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        check_email(&email)?;

        let password_hash = self.hash_password(&registration.password).await?;
        let record = self
            .store
            .create_account(NewAccount {
                email,
                password_hash,
                profile: registration.profile,
                created_at: Utc::now(),
            })
            .await
            .map_err(map_email_conflict)?;

        tracing::info!(customer_id = %record.id, "Account registered");
        Ok(record.view())
    }

    /// Replaces an account's editable fields without clobbering its password.
    ///
    /// A supplied password that already verifies against the stored hash
    /// keeps that hash; any other supplied password is hashed and stored.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: CustomerId,
        update: ProfileUpdate,
    ) -> Result<AccountView, AuthError> {
        let current = self
            .store
            .get_account(id)
            .await?
            .ok_or(AuthError::AccountNotFound(id))?;

        let email = update.email.trim().to_string();
        check_email(&email)?;

        let password_hash = match update.password.as_deref() {
            None | Some("") => current.password_hash,
            Some(candidate) => {
                if self.verify_password(candidate, &current.password_hash).await? {
                    current.password_hash
                } else {
                    self.hash_password(candidate).await?
                }
            }
        };

        let record = self
            .store
            .update_account(
                id,
                AccountUpdate {
                    email,
                    password_hash,
                    profile: update.profile,
                },
            )
            .await
            .map_err(|e| match e {
                StoreError::CustomerNotFound(id) => AuthError::AccountNotFound(id),
                other => map_email_conflict(other),
            })?;

        Ok(record.view())
    }

    pub async fn get_account(&self, id: CustomerId) -> Result<AccountView, AuthError> {
        self.store
            .get_account(id)
            .await?
            .map(|record| record.view())
            .ok_or(AuthError::AccountNotFound(id))
    }

    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountView>, AuthError> {
        let record = self.store.find_account_by_email(email).await?;
        Ok(record.map(|record| record.view()))
    }

    pub async fn list_accounts(&self) -> Result<Vec<AccountView>, AuthError> {
        let records = self.store.list_accounts().await?;
        Ok(records.iter().map(AccountRecord::view).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, id: CustomerId) -> Result<(), AuthError> {
        self.store.delete_account(id).await.map_err(|e| match e {
            StoreError::CustomerNotFound(id) => AuthError::AccountNotFound(id),
            other => AuthError::Store(other),
        })
    }

    /// Argon2 is CPU-bound; both helpers run it on the blocking pool.
    async fn hash_password(&self, secret: &str) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let secret = secret.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking join error: {e}");
                AuthError::Hashing(e.to_string())
            })?
    }

    async fn verify_password(&self, secret: &str, stored: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        let secret = secret.to_string();
        let stored = stored.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &stored))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking join error: {e}");
                AuthError::Hashing(e.to_string())
            })
    }

    async fn upgrade_hash(&self, id: CustomerId, password: &str) {
        let result = match self.hash_password(password).await {
            Ok(hash) => self.store.set_password_hash(id, hash).await.map_err(AuthError::from),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => tracing::info!(customer_id = %id, "Upgraded legacy password hash"),
            Err(e) => tracing::warn!(customer_id = %id, error = %e, "Password hash upgrade failed"),
        }
    }
}

fn identity_of(account: &AccountRecord) -> Identity {
    Identity {
        customer_id: account.id,
        email: account.email.clone(),
        given_name: account.profile.first_name.clone(),
        family_name: account.profile.last_name.clone(),
    }
}

fn check_email(email: &str) -> Result<(), AuthError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthError::InvalidEmail(email.to_string())),
    }
}

fn map_email_conflict(e: StoreError) -> AuthError {
    match e {
        StoreError::DuplicateEmail(email) => AuthError::EmailTaken(email),
        other => AuthError::Store(other),
    }
}
