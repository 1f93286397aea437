use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    CustomerId, DeliveryInfo, Money, Order, OrderId, OrderItem, OrderStatus, Product, ProductId,
};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{
        AccountRecord, AccountUpdate, CustomerStore, NewAccount, NewOrder, NewOrderItem,
        OrderReplacement, OrderStore, ProductCatalog, check_item_row,
    },
};

/// In-memory store for local runs and tests.
///
/// All tables sit behind one lock, so a write that touches orders and their
/// lines is observed all-or-nothing, like a committed transaction in the
/// PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    customers: HashMap<CustomerId, AccountRecord>,
    orders: HashMap<OrderId, OrderRow>,
    order_items: HashMap<OrderId, Vec<NewOrderItem>>,
    products: HashMap<ProductId, Product>,
}

#[derive(Clone)]
struct OrderRow {
    id: OrderId,
    customer_id: CustomerId,
    order_date: DateTime<Utc>,
    total_amount: Money,
    status: OrderStatus,
    delivery: DeliveryInfo,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }

    fn materialize(&self, row: &OrderRow) -> Order {
        let order_items = self
            .order_items
            .get(&row.id)
            .map(|items| {
                items
                    .iter()
                    .map(|item| OrderItem {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        unit_price: item.unit_price,
                        product: self.products.get(&item.product_id).cloned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Order {
            id: row.id,
            customer_id: row.customer_id,
            order_date: row.order_date,
            total_amount: row.total_amount,
            status: row.status,
            delivery: row.delivery.clone(),
            customer: self.customers.get(&row.customer_id).map(AccountRecord::view),
            order_items,
        }
    }

    fn collect_orders<F>(&self, filter: F) -> Vec<Order>
    where
        F: Fn(&OrderRow) -> bool,
    {
        let mut rows: Vec<&OrderRow> = self.orders.values().filter(|r| filter(r)).collect();
        rows.sort_by(|a, b| a.order_date.cmp(&b.order_date).then(a.id.cmp(&b.id)));
        rows.into_iter().map(|row| self.materialize(row)).collect()
    }

    fn remove_order(&mut self, id: OrderId) {
        self.order_items.remove(&id);
        self.orders.remove(&id);
    }
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Returns the number of stored order lines across all orders.
    pub async fn order_item_count(&self) -> usize {
        self.tables
            .read()
            .await
            .order_items
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        *tables = Tables::default();
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&account.email, None) {
            return Err(StoreError::DuplicateEmail(account.email));
        }

        let record = AccountRecord {
            id: CustomerId::new(),
            email: account.email,
            password_hash: account.password_hash,
            profile: account.profile,
            created_at: account.created_at,
        };
        tables.customers.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_account(&self, id: CustomerId) -> Result<Option<AccountRecord>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.values().find(|c| c.email == email).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>> {
        let tables = self.tables.read().await;
        let mut accounts: Vec<_> = tables.customers.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn update_account(&self, id: CustomerId, update: AccountUpdate) -> Result<AccountRecord> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&id) {
            return Err(StoreError::CustomerNotFound(id));
        }
        if tables.email_taken(&update.email, Some(id)) {
            return Err(StoreError::DuplicateEmail(update.email));
        }

        let record = tables
            .customers
            .get_mut(&id)
            .ok_or(StoreError::CustomerNotFound(id))?;
        record.email = update.email;
        record.password_hash = update.password_hash;
        record.profile = update.profile;
        Ok(record.clone())
    }

    async fn set_password_hash(&self, id: CustomerId, password_hash: String) -> Result<()> {
        let mut tables = self.tables.write().await;
        let record = tables
            .customers
            .get_mut(&id)
            .ok_or(StoreError::CustomerNotFound(id))?;
        record.password_hash = password_hash;
        Ok(())
    }

    async fn delete_account(&self, id: CustomerId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.customers.remove(&id).is_none() {
            return Err(StoreError::CustomerNotFound(id));
        }

        let owned: Vec<OrderId> = tables
            .orders
            .values()
            .filter(|row| row.customer_id == id)
            .map(|row| row.id)
            .collect();
        for order_id in owned {
            tables.remove_order(order_id);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        for item in &order.items {
            check_item_row(item)?;
        }

        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&order.customer_id) {
            return Err(StoreError::CustomerNotFound(order.customer_id));
        }
        if tables.orders.contains_key(&order.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate order id {}",
                order.id
            )));
        }

        let row = OrderRow {
            id: order.id,
            customer_id: order.customer_id,
            order_date: order.order_date,
            total_amount: order.total_amount,
            status: order.status,
            delivery: order.delivery,
        };
        tables.order_items.insert(row.id, order.items);
        tables.orders.insert(row.id, row.clone());
        Ok(tables.materialize(&row))
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&id).map(|row| tables.materialize(row)))
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.tables.read().await.collect_orders(|_| true))
    }

    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.collect_orders(|row| row.customer_id == customer_id))
    }

    async fn replace_order(
        &self,
        id: OrderId,
        expected_status: OrderStatus,
        replacement: OrderReplacement,
    ) -> Result<Order> {
        for item in &replacement.items {
            check_item_row(item)?;
        }

        let mut tables = self.tables.write().await;
        let row = tables
            .orders
            .get_mut(&id)
            .ok_or(StoreError::OrderNotFound(id))?;
        if row.status != expected_status {
            return Err(StoreError::StatusConflict {
                order_id: id,
                expected: expected_status,
                actual: row.status,
            });
        }

        row.status = replacement.status;
        row.total_amount = replacement.total_amount;
        row.delivery = replacement.delivery;
        let row = row.clone();
        tables.order_items.insert(id, replacement.items);
        Ok(tables.materialize(&row))
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .orders
            .get_mut(&id)
            .ok_or(StoreError::OrderNotFound(id))?;
        if row.status != expected {
            return Err(StoreError::StatusConflict {
                order_id: id,
                expected,
                actual: row.status,
            });
        }
        row.status = next;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&id) {
            return Err(StoreError::OrderNotFound(id));
        }
        tables.remove_order(id);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryStore {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn put_product(&self, product: Product) -> Result<()> {
        self.tables.write().await.products.insert(product.id, product);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use common::Profile;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            profile: Profile::default(),
            created_at: Utc::now(),
        }
    }

    fn new_order(customer_id: CustomerId, items: Vec<NewOrderItem>) -> NewOrder {
        let total = items.iter().map(|i| i.unit_price.multiply(i.quantity)).sum();
        NewOrder {
            id: OrderId::new(),
            customer_id,
            order_date: Utc::now(),
            total_amount: total,
            status: OrderStatus::Pending,
            delivery: DeliveryInfo::new("Dorpsstraat 1", "1234 AB", "Utrecht"),
            items,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::new();
        store.create_account(new_account("a@b.nl")).await.unwrap();

        let result = store.create_account(new_account("a@b.nl")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));

        // Matching is case-sensitive.
        assert!(store.create_account(new_account("A@b.nl")).await.is_ok());
    }

    #[tokio::test]
    async fn update_account_cannot_take_another_email() {
        let store = InMemoryStore::new();
        store.create_account(new_account("a@b.nl")).await.unwrap();
        let other = store.create_account(new_account("c@d.nl")).await.unwrap();

        let result = store
            .update_account(
                other.id,
                AccountUpdate {
                    email: "a@b.nl".to_string(),
                    password_hash: other.password_hash.clone(),
                    profile: Profile::default(),
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));

        // Keeping its own address is fine.
        let updated = store
            .update_account(
                other.id,
                AccountUpdate {
                    email: "c@d.nl".to_string(),
                    password_hash: "new".to_string(),
                    profile: Profile::default(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.password_hash, "new");
    }

    #[tokio::test]
    async fn insert_order_materializes_customer_and_products() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();
        store
            .put_product(Product {
                id: ProductId::new(1),
                name: "Baklava".to_string(),
                price: Money::from_cents(300),
                image_url: None,
            })
            .await
            .unwrap();

        let order = store
            .insert_order(new_order(
                account.id,
                vec![
                    NewOrderItem::new(1, 3, Money::from_cents(250)),
                    NewOrderItem::new(42, 1, Money::from_cents(100)),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(order.customer.as_ref().map(|c| c.id), Some(account.id));
        assert_eq!(order.order_items.len(), 2);
        // Catalog price changes never touch the snapshot.
        assert_eq!(order.order_items[0].unit_price, Money::from_cents(250));
        assert_eq!(
            order.order_items[0].product.as_ref().map(|p| p.name.as_str()),
            Some("Baklava")
        );
        assert!(order.order_items[1].product.is_none());
    }

    #[tokio::test]
    async fn rejected_line_leaves_no_order_behind() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();

        let result = store
            .insert_order(new_order(
                account.id,
                vec![
                    NewOrderItem::new(1, 1, Money::from_cents(100)),
                    NewOrderItem::new(2, 0, Money::from_cents(100)),
                ],
            ))
            .await;

        assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
        assert_eq!(store.order_count().await, 0);
        assert_eq!(store.order_item_count().await, 0);
    }

    #[tokio::test]
    async fn insert_order_for_unknown_customer_fails() {
        let store = InMemoryStore::new();
        let result = store
            .insert_order(new_order(
                CustomerId::new(),
                vec![NewOrderItem::new(1, 1, Money::from_cents(100))],
            ))
            .await;
        assert!(matches!(result, Err(StoreError::CustomerNotFound(_))));
    }

    #[tokio::test]
    async fn replace_order_swaps_line_set() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();
        let order = store
            .insert_order(new_order(
                account.id,
                vec![
                    NewOrderItem::new(1, 1, Money::from_cents(100)),
                    NewOrderItem::new(2, 2, Money::from_cents(100)),
                ],
            ))
            .await
            .unwrap();

        let replaced = store
            .replace_order(
                order.id,
                OrderStatus::Pending,
                OrderReplacement {
                    status: OrderStatus::Processing,
                    total_amount: Money::from_cents(500),
                    delivery: order.delivery.clone(),
                    items: vec![NewOrderItem::new(3, 5, Money::from_cents(100))],
                },
            )
            .await
            .unwrap();

        assert_eq!(replaced.status, OrderStatus::Processing);
        assert_eq!(replaced.order_items.len(), 1);
        assert_eq!(replaced.order_items[0].product_id, ProductId::new(3));
        assert_eq!(store.order_item_count().await, 1);
    }

    #[tokio::test]
    async fn update_status_is_compare_and_set() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();
        let order = store
            .insert_order(new_order(
                account.id,
                vec![NewOrderItem::new(1, 1, Money::from_cents(100))],
            ))
            .await
            .unwrap();

        store
            .update_status(order.id, OrderStatus::Pending, OrderStatus::Processing)
            .await
            .unwrap();

        let result = store
            .update_status(order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await;
        assert!(matches!(
            result,
            Err(StoreError::StatusConflict {
                actual: OrderStatus::Processing,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn orders_are_listed_oldest_first() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();
        let other = store.create_account(new_account("c@d.nl")).await.unwrap();

        let mut newer = new_order(account.id, vec![NewOrderItem::new(1, 1, Money::from_cents(100))]);
        let mut older = newer.clone();
        older.id = OrderId::new();
        older.order_date = newer.order_date - Duration::hours(1);
        newer.order_date += Duration::seconds(1);
        let foreign = new_order(other.id, vec![NewOrderItem::new(1, 1, Money::from_cents(100))]);

        store.insert_order(newer.clone()).await.unwrap();
        store.insert_order(older.clone()).await.unwrap();
        store.insert_order(foreign).await.unwrap();

        let all = store.list_orders().await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = store.list_orders_for_customer(account.id).await.unwrap();
        let ids: Vec<_> = mine.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[tokio::test]
    async fn deleting_account_cascades_to_orders() {
        let store = InMemoryStore::new();
        let account = store.create_account(new_account("a@b.nl")).await.unwrap();
        store
            .insert_order(new_order(
                account.id,
                vec![NewOrderItem::new(1, 2, Money::from_cents(100))],
            ))
            .await
            .unwrap();

        store.delete_account(account.id).await.unwrap();

        assert_eq!(store.order_count().await, 0);
        assert_eq!(store.order_item_count().await, 0);
        assert!(store.get_account(account.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_order_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.delete_order(OrderId::new()).await;
        assert!(matches!(result, Err(StoreError::OrderNotFound(_))));
    }
}
