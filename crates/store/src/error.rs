use common::{CustomerId, OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No account with this id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// No order with this id.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Another account already uses this email address.
    #[error("Email address already registered: {0}")]
    DuplicateEmail(String),

    /// The order changed status since it was read.
    #[error("Status conflict for order {order_id}: expected {expected}, found {actual}")]
    StatusConflict {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// A row was rejected by a table constraint.
    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
