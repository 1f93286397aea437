//! Domain layer for the storefront system.
//!
//! This crate provides the services the HTTP layer calls into:
//! - Password hashing, bearer tokens and token revocation
//! - `AuthService` for login, refresh, logout, registration and profile updates
//! - `OrderService` for checkout, order replacement and status transitions

pub mod auth;
pub mod error;
pub mod order;

pub use auth::{
    AuthService, Claims, Identity, LoginOutcome, PasswordHasher, ProfileUpdate, Registration,
    RevocationList, TokenConfig, TokenService, extract_bearer,
};
pub use error::{AuthError, DomainError, ErrorKind, OrderError};
pub use order::{OrderService, ValidatedOrder, validate_order};
