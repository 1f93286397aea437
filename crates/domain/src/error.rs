//! Domain error types.

use common::{CustomerId, Money, OrderId, OrderStatus, ProductId};
use store::StoreError;
use thiserror::Error;

/// Coarse classification the HTTP layer turns into a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    fn of_store(err: &StoreError) -> Self {
        match err {
            StoreError::CustomerNotFound(_) | StoreError::OrderNotFound(_) => ErrorKind::NotFound,
            StoreError::DuplicateEmail(_) | StoreError::StatusConflict { .. } => ErrorKind::Conflict,
            StoreError::ConstraintViolation(_) => ErrorKind::Validation,
            StoreError::CorruptRow(_) | StoreError::Database(_) | StoreError::Migration(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Errors from login, tokens, registration and profile updates.
///
/// The Dutch messages are shown to end users as-is.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("E-mailadres en wachtwoord zijn verplicht.")]
    MissingCredentials,

    /// Unknown account and wrong password share this variant.
    #[error("Ongeldige inloggegevens.")]
    InvalidCredentials,

    #[error("Token is verplicht.")]
    MissingToken,

    /// Bad signature, malformed, expired, revoked or orphaned token.
    #[error("Ongeldige of verlopen token.")]
    InvalidToken,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Email address already registered: {0}")]
    EmailTaken(String),

    #[error("Customer not found: {0}")]
    AccountNotFound(CustomerId),

    #[error("Signing secret must be at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials | AuthError::MissingToken | AuthError::InvalidEmail(_) => {
                ErrorKind::Validation
            }
            AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::EmailTaken(_) => ErrorKind::Conflict,
            AuthError::AccountNotFound(_) => ErrorKind::NotFound,
            AuthError::WeakSecret { .. } | AuthError::Hashing(_) | AuthError::Signing(_) => {
                ErrorKind::Internal
            }
            AuthError::Store(e) => ErrorKind::of_store(e),
        }
    }
}

/// Errors from placing, changing and reading orders.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("An order needs at least one item")]
    NoItems,

    #[error("Invalid product id: {0}")]
    InvalidProduct(ProductId),

    #[error("Quantity for product {product_id} must be at least 1, got {quantity}")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    #[error("Unit price for product {0} must not be negative")]
    NegativePrice(ProductId),

    #[error("Missing delivery fields: {}", .0.join(", "))]
    MissingDelivery(Vec<&'static str>),

    #[error("Order amounts are too large")]
    AmountOverflow,

    #[error("Total amount {actual} does not match the sum of the items ({expected})")]
    TotalMismatch { expected: Money, actual: Money },

    #[error("Order id in the body ({body}) does not match the path ({path})")]
    IdMismatch { path: OrderId, body: OrderId },

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Cannot move order from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order {0} was changed concurrently")]
    ConcurrentUpdate(OrderId),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::CustomerNotFound(id) => OrderError::CustomerNotFound(id),
            StoreError::OrderNotFound(id) => OrderError::OrderNotFound(id),
            StoreError::StatusConflict { order_id, .. } => OrderError::ConcurrentUpdate(order_id),
            other => OrderError::Store(other),
        }
    }
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NoItems
            | OrderError::InvalidProduct(_)
            | OrderError::InvalidQuantity { .. }
            | OrderError::NegativePrice(_)
            | OrderError::MissingDelivery(_)
            | OrderError::TotalMismatch { .. }
            | OrderError::AmountOverflow
            | OrderError::IdMismatch { .. } => ErrorKind::Validation,
            OrderError::CustomerNotFound(_) | OrderError::OrderNotFound(_) => ErrorKind::NotFound,
            OrderError::IllegalTransition { .. } | OrderError::ConcurrentUpdate(_) => {
                ErrorKind::Conflict
            }
            OrderError::Store(e) => ErrorKind::of_store(e),
        }
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Auth(e) => e.kind(),
            DomainError::Order(e) => e.kind(),
        }
    }
}
