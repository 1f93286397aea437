//! Accounts and bearer credentials.

mod hasher;
mod revocation;
mod service;
mod token;

pub use hasher::PasswordHasher;
pub use revocation::RevocationList;
pub use service::{AuthService, LoginOutcome, ProfileUpdate, Registration};
pub use token::{
    Claims, DEFAULT_TTL_HOURS, Identity, MAX_TTL_HOURS, MIN_SECRET_LEN, TokenConfig, TokenService,
    extract_bearer,
};
