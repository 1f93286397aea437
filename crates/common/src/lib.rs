//! Shared types for the storefront system.
//!
//! Everything in here crosses a process boundary: identifiers, money,
//! the order status machine and the JSON bodies exchanged between the
//! API server and its clients.

pub mod account;
pub mod api;
pub mod money;
pub mod order;
pub mod status;
pub mod types;

pub use account::{AccountView, Profile};
pub use money::{Money, MoneyError};
pub use order::{DeliveryInfo, Order, OrderItem, Product};
pub use status::{OrderStatus, ParseStatusError};
pub use types::{CustomerId, OrderId, ProductId};
