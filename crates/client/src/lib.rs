//! Client side of the storefront.
//!
//! This crate provides:
//! - `Cart`: the local shopping cart and its reducer actions
//! - `CartStore`: cart state that persists after every change and notifies subscribers
//! - `Session` and `ApiClient` for talking to the storefront API
//! - `checkout` for turning the cart into an order

pub mod api_client;
pub mod cart;
pub mod cart_store;
pub mod checkout;
pub mod error;
pub mod session;
pub mod storage;

pub use api_client::{ApiClient, OrderGateway};
pub use cart::{Cart, CartAction, CartLine, CartNotice, MAX_QUANTITY};
pub use cart_store::CartStore;
pub use checkout::{CheckoutReceipt, build_order_request, checkout};
pub use error::{CartError, ClientError};
pub use session::Session;
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage, decode_cart, encode_cart};
