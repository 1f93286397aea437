//! Persistence for accounts, orders and the read-only product catalog.
//!
//! Two interchangeable backends implement the same traits: a PostgreSQL
//! store for production and an in-memory store for tests and local runs.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{
    AccountRecord, AccountUpdate, CustomerStore, NewAccount, NewOrder, NewOrderItem,
    OrderReplacement, OrderStore, ProductCatalog, Store,
};
