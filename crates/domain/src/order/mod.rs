//! Order placement, replacement and status changes.

mod service;
mod validation;

pub use service::OrderService;
pub use validation::{ValidatedOrder, validate_order};
