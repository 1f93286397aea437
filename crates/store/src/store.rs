use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    AccountView, CustomerId, DeliveryInfo, Money, Order, OrderId, OrderStatus, Product, ProductId,
    Profile,
};

use crate::{Result, StoreError};

/// A stored account, including its password hash.
///
/// Never serialized; use [`AccountRecord::view`] for anything that leaves
/// the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: CustomerId,
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Returns the account without its password hash.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            profile: self.profile.clone(),
            created_at: self.created_at,
        }
    }
}

/// Input for creating an account. The hash is computed by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Replacement of every mutable account column. `created_at` and `id` are
/// not part of it.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
}

/// One line of an order about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl NewOrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }
}

/// Input for inserting an order together with its lines.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub delivery: DeliveryInfo,
    pub items: Vec<NewOrderItem>,
}

/// Full replacement of an order's mutable state. The line set is swapped
/// wholesale, never patched.
#[derive(Debug, Clone)]
pub struct OrderReplacement {
    pub status: OrderStatus,
    pub total_amount: Money,
    pub delivery: DeliveryInfo,
    pub items: Vec<NewOrderItem>,
}

/// Account persistence.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Creates an account and assigns its id.
    ///
    /// Fails with `DuplicateEmail` when the address is taken (exact,
    /// case-sensitive match).
    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord>;

    async fn get_account(&self, id: CustomerId) -> Result<Option<AccountRecord>>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountRecord>>;

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>>;

    /// Overwrites the mutable columns of an account.
    async fn update_account(&self, id: CustomerId, update: AccountUpdate) -> Result<AccountRecord>;

    /// Replaces only the password hash.
    async fn set_password_hash(&self, id: CustomerId, password_hash: String) -> Result<()>;

    /// Deletes an account. Its orders and their lines go with it.
    async fn delete_account(&self, id: CustomerId) -> Result<()>;
}

/// Order persistence.
///
/// Every write touching both orders and order lines is atomic: readers see
/// either the state before or the state after, never an order without its
/// lines.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts an order and its lines in one transaction and returns the
    /// materialized order.
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// All orders, oldest first.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Orders of one customer, oldest first.
    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    /// Replaces the order's state and lines in one transaction.
    ///
    /// Fails with `StatusConflict` when the stored status is no longer
    /// `expected_status`.
    async fn replace_order(
        &self,
        id: OrderId,
        expected_status: OrderStatus,
        replacement: OrderReplacement,
    ) -> Result<Order>;

    /// Compare-and-set of the order status.
    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<()>;

    /// Deletes the order's lines, then the order, in one transaction.
    async fn delete_order(&self, id: OrderId) -> Result<()>;
}

/// Read access to the external product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Inserts or replaces a catalog row. Used to seed local and test setups.
    async fn put_product(&self, product: Product) -> Result<()>;
}

/// Everything the server needs from a backend.
pub trait Store: CustomerStore + OrderStore + ProductCatalog + Clone + 'static {}

impl<T> Store for T where T: CustomerStore + OrderStore + ProductCatalog + Clone + 'static {}

/// Mirrors the `order_items` table checks so both backends reject the same
/// rows.
pub(crate) fn check_item_row(item: &NewOrderItem) -> Result<()> {
    if item.quantity == 0 {
        return Err(StoreError::ConstraintViolation(format!(
            "order item quantity must be positive (product {})",
            item.product_id
        )));
    }
    if item.unit_price.is_negative() {
        return Err(StoreError::ConstraintViolation(format!(
            "order item unit price must not be negative (product {})",
            item.product_id
        )));
    }
    Ok(())
}
