use std::collections::HashMap;

use async_trait::async_trait;
use common::{
    CustomerId, DeliveryInfo, Money, Order, OrderId, OrderItem, OrderStatus, Product, ProductId,
    Profile,
};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result, StoreError,
    store::{
        AccountRecord, AccountUpdate, CustomerStore, NewAccount, NewOrder, NewOrderItem,
        OrderReplacement, OrderStore, ProductCatalog, check_item_row,
    },
};

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone_number, \
     address, postal_code, city, created_at";

const ORDER_SELECT: &str = r#"
    SELECT o.id, o.customer_id, o.order_date, o.total_amount_cents, o.status,
           o.delivery_address, o.delivery_postal_code, o.delivery_city, o.notes,
           c.email AS customer_email,
           c.first_name AS customer_first_name,
           c.last_name AS customer_last_name,
           c.phone_number AS customer_phone_number,
           c.address AS customer_address,
           c.postal_code AS customer_postal_code,
           c.city AS customer_city,
           c.created_at AS customer_created_at
    FROM orders o
    JOIN customers c ON c.id = o.customer_id
"#;

/// Which orders a read returns.
enum OrderFilter {
    All,
    ById(OrderId),
    ByCustomer(CustomerId),
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn profile_from_row(row: &PgRow, prefix: &str) -> Result<Profile> {
        let column = |name: &str| format!("{prefix}{name}");
        Ok(Profile {
            first_name: row.try_get(column("first_name").as_str())?,
            last_name: row.try_get(column("last_name").as_str())?,
            phone_number: row.try_get(column("phone_number").as_str())?,
            address: row.try_get(column("address").as_str())?,
            postal_code: row.try_get(column("postal_code").as_str())?,
            city: row.try_get(column("city").as_str())?,
        })
    }

    fn row_to_account(row: PgRow) -> Result<AccountRecord> {
        Ok(AccountRecord {
            id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id")?),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            profile: Self::profile_from_row(&row, "")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_order(row: &PgRow) -> Result<Order> {
        let customer_id = CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id")?);
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::CorruptRow(e.to_string()))?;

        let customer = common::AccountView {
            id: customer_id,
            email: row.try_get("customer_email")?,
            profile: Self::profile_from_row(row, "customer_")?,
            created_at: row.try_get("customer_created_at")?,
        };

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            customer_id,
            order_date: row.try_get("order_date")?,
            total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
            status,
            delivery: DeliveryInfo {
                address: row.try_get("delivery_address")?,
                postal_code: row.try_get("delivery_postal_code")?,
                city: row.try_get("delivery_city")?,
                notes: row.try_get("notes")?,
            },
            customer: Some(customer),
            order_items: Vec::new(),
        })
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| StoreError::CorruptRow(format!("negative quantity {quantity}")))?;

        let product = match row.try_get::<Option<i64>, _>("catalog_id")? {
            Some(id) => Some(Product {
                id: ProductId::new(id),
                name: row.try_get("product_name")?,
                price: Money::from_cents(row.try_get("product_price_cents")?),
                image_url: row.try_get("product_image_url")?,
            }),
            None => None,
        };

        Ok(OrderItem {
            product_id: ProductId::new(row.try_get("product_id")?),
            quantity,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
            product,
        })
    }

    /// Loads orders with their customer and lines. Run it inside a
    /// transaction so the order rows and line rows come from one snapshot.
    async fn fetch_orders(conn: &mut PgConnection, filter: OrderFilter) -> Result<Vec<Order>> {
        let order_by = "ORDER BY o.order_date ASC, o.id ASC";
        let rows = match filter {
            OrderFilter::All => {
                let sql = format!("{ORDER_SELECT} {order_by}");
                sqlx::query(&sql).fetch_all(&mut *conn).await?
            }
            OrderFilter::ById(id) => {
                let sql = format!("{ORDER_SELECT} WHERE o.id = $1 {order_by}");
                sqlx::query(&sql)
                    .bind(id.as_uuid())
                    .fetch_all(&mut *conn)
                    .await?
            }
            OrderFilter::ByCustomer(customer_id) => {
                let sql = format!("{ORDER_SELECT} WHERE o.customer_id = $1 {order_by}");
                sqlx::query(&sql)
                    .bind(customer_id.as_uuid())
                    .fetch_all(&mut *conn)
                    .await?
            }
        };

        let mut orders = rows
            .iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;
        if orders.is_empty() {
            return Ok(orders);
        }

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id.as_uuid()).collect();
        let item_rows = sqlx::query(
            r#"
            SELECT i.order_id, i.product_id, i.quantity, i.unit_price_cents,
                   p.id AS catalog_id, p.name AS product_name,
                   p.price_cents AS product_price_cents, p.image_url AS product_image_url
            FROM order_items i
            LEFT JOIN products p ON p.id = i.product_id
            WHERE i.order_id = ANY($1)
            ORDER BY i.order_id, i.position ASC
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&mut *conn)
        .await?;

        let mut items: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: Uuid = row.try_get("order_id")?;
            items.entry(order_id).or_default().push(Self::row_to_item(row)?);
        }
        for order in &mut orders {
            order.order_items = items.remove(&order.id.as_uuid()).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn insert_items(
        conn: &mut PgConnection,
        order_id: OrderId,
        items: &[NewOrderItem],
    ) -> Result<()> {
        for (position, item) in items.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| StoreError::ConstraintViolation("too many order items".into()))?;
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                StoreError::ConstraintViolation(format!("quantity out of range: {}", item.quantity))
            })?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, position, product_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id.as_uuid())
            .bind(position)
            .bind(item.product_id.as_i64())
            .bind(quantity)
            .bind(item.unit_price.cents())
            .execute(&mut *conn)
            .await
            .map_err(map_constraint_error)?;
        }
        Ok(())
    }
}

/// Turns named constraint violations into `ConstraintViolation`.
fn map_constraint_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && let Some(constraint) = db_err.constraint()
    {
        return StoreError::ConstraintViolation(constraint.to_string());
    }
    StoreError::Database(e)
}

fn map_account_write_error(e: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.constraint() == Some("unique_customer_email")
    {
        return StoreError::DuplicateEmail(email.to_string());
    }
    map_constraint_error(e)
}

#[async_trait]
impl CustomerStore for PostgresStore {
    async fn create_account(&self, account: NewAccount) -> Result<AccountRecord> {
        let sql = format!(
            r#"
            INSERT INTO customers (id, email, password_hash, first_name, last_name, phone_number,
                                   address, postal_code, city, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(CustomerId::new().as_uuid())
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.profile.first_name)
            .bind(&account.profile.last_name)
            .bind(&account.profile.phone_number)
            .bind(&account.profile.address)
            .bind(&account.profile.postal_code)
            .bind(&account.profile.city)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_account_write_error(e, &account.email))?;

        Self::row_to_account(row)
    }

    async fn get_account(&self, id: CustomerId) -> Result<Option<AccountRecord>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM customers WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_account).transpose()
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM customers WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_account).transpose()
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM customers ORDER BY created_at ASC, id ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Self::row_to_account).collect()
    }

    async fn update_account(&self, id: CustomerId, update: AccountUpdate) -> Result<AccountRecord> {
        let sql = format!(
            r#"
            UPDATE customers
            SET email = $2, password_hash = $3, first_name = $4, last_name = $5,
                phone_number = $6, address = $7, postal_code = $8, city = $9
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(&update.email)
            .bind(&update.password_hash)
            .bind(&update.profile.first_name)
            .bind(&update.profile.last_name)
            .bind(&update.profile.phone_number)
            .bind(&update.profile.address)
            .bind(&update.profile.postal_code)
            .bind(&update.profile.city)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_account_write_error(e, &update.email))?;

        match row {
            Some(row) => Self::row_to_account(row),
            None => Err(StoreError::CustomerNotFound(id)),
        }
    }

    async fn set_password_hash(&self, id: CustomerId, password_hash: String) -> Result<()> {
        let result = sqlx::query("UPDATE customers SET password_hash = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::CustomerNotFound(id));
        }
        Ok(())
    }

    async fn delete_account(&self, id: CustomerId) -> Result<()> {
        // Orders and their lines follow through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::CustomerNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        for item in &order.items {
            check_item_row(item)?;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, order_date, total_amount_cents, status,
                                delivery_address, delivery_postal_code, delivery_city, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.order_date)
        .bind(order.total_amount.cents())
        .bind(order.status.as_str())
        .bind(&order.delivery.address)
        .bind(&order.delivery.postal_code)
        .bind(&order.delivery.city)
        .bind(&order.delivery.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("fk_orders_customer")
            {
                return StoreError::CustomerNotFound(order.customer_id);
            }
            map_constraint_error(e)
        })?;

        Self::insert_items(&mut tx, order.id, &order.items).await?;

        let created = Self::fetch_orders(&mut tx, OrderFilter::ById(order.id))
            .await?
            .pop()
            .ok_or(StoreError::OrderNotFound(order.id))?;

        tx.commit().await?;
        tracing::debug!(order_id = %order.id, lines = order.items.len(), "Order inserted");
        Ok(created)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        let order = Self::fetch_orders(&mut tx, OrderFilter::ById(id)).await?.pop();
        tx.commit().await?;
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        let orders = Self::fetch_orders(&mut tx, OrderFilter::All).await?;
        tx.commit().await?;
        Ok(orders)
    }

    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        let orders = Self::fetch_orders(&mut tx, OrderFilter::ByCustomer(customer_id)).await?;
        tx.commit().await?;
        Ok(orders)
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

        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        let actual = current
            .ok_or(StoreError::OrderNotFound(id))?
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::CorruptRow(e.to_string()))?;
        if actual != expected_status {
            return Err(StoreError::StatusConflict {
                order_id: id,
                expected: expected_status,
                actual,
            });
        }

        sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, total_amount_cents = $3, delivery_address = $4,
                delivery_postal_code = $5, delivery_city = $6, notes = $7
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(replacement.status.as_str())
        .bind(replacement.total_amount.cents())
        .bind(&replacement.delivery.address)
        .bind(&replacement.delivery.postal_code)
        .bind(&replacement.delivery.city)
        .bind(&replacement.delivery.notes)
        .execute(&mut *tx)
        .await
        .map_err(map_constraint_error)?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;
        Self::insert_items(&mut tx, id, &replacement.items).await?;

        let updated = Self::fetch_orders(&mut tx, OrderFilter::ById(id))
            .await?
            .pop()
            .ok_or(StoreError::OrderNotFound(id))?;

        tx.commit().await?;
        tracing::debug!(order_id = %id, lines = updated.order_items.len(), "Order replaced");
        Ok(updated)
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE orders SET status = $3 WHERE id = $1 AND status = $2")
            .bind(id.as_uuid())
            .bind(expected.as_str())
            .bind(next.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        let actual = current
            .ok_or(StoreError::OrderNotFound(id))?
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::CorruptRow(e.to_string()))?;

        Err(StoreError::StatusConflict {
            order_id: id,
            expected,
            actual,
        })
    }

    async fn delete_order(&self, id: OrderId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::OrderNotFound(id));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for PostgresStore {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT id, name, price_cents, image_url FROM products WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Product {
                id: ProductId::new(row.try_get("id")?),
                name: row.try_get("name")?,
                price: Money::from_cents(row.try_get("price_cents")?),
                image_url: row.try_get("image_url")?,
            })),
            None => Ok(None),
        }
    }

    async fn put_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                price_cents = EXCLUDED.price_cents,
                image_url = EXCLUDED.image_url
            "#,
        )
        .bind(product.id.as_i64())
        .bind(&product.name)
        .bind(product.price.cents())
        .bind(&product.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(())
    }
}
