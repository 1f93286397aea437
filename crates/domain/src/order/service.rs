//! Order service: turns checkout bodies into persisted orders and guards
//! every later change.

use chrono::Utc;
use common::api::{PlaceOrderRequest, UpdateOrderRequest};
use common::{CustomerId, Order, OrderId, OrderStatus};
use store::{CustomerStore, NewOrder, OrderReplacement, OrderStore};

use crate::error::OrderError;

use super::validate_order;

/// Service for managing orders.
#[derive(Clone)]
pub struct OrderService<S> {
    store: S,
}

impl<S> OrderService<S>
where
    S: OrderStore + CustomerStore,
{
    /// Creates a new order service on top of the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Places an order for a customer.
    ///
    /// The order starts as `Pending`, dated now, and keeps the unit prices
    /// sent by the client as its permanent price snapshot. The order row and
    /// its lines are written in one transaction.
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, OrderError> {
        let validated = validate_order(
            &request.order_items,
            &request.delivery,
            request.total_amount,
        )?;

        if self.store.get_account(request.customer_id).await?.is_none() {
            return Err(OrderError::CustomerNotFound(request.customer_id));
        }

        let order = self
            .store
            .insert_order(NewOrder {
                id: OrderId::new(),
                customer_id: request.customer_id,
                order_date: Utc::now(),
                total_amount: validated.total_amount,
                status: OrderStatus::Pending,
                delivery: validated.delivery,
                items: validated.items,
            })
            .await?;

        metrics::counter!("orders_placed_total").increment(1);
        metrics::histogram!("order_total_amount_euros").record(order.total_amount.as_euros());
        tracing::info!(order_id = %order.id, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    /// Replaces an order's delivery data, total and lines.
    ///
    /// A status in the body is treated like [`Self::update_status`] would:
    /// it must be the current status or a legal next one.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_order(
        &self,
        id: OrderId,
        request: UpdateOrderRequest,
    ) -> Result<Order, OrderError> {
        if request.id != id {
            return Err(OrderError::IdMismatch {
                path: id,
                body: request.id,
            });
        }

        let current = self.get_by_id(id).await?;
        let next = request.status.unwrap_or(current.status);
        check_transition(current.status, next)?;

        let validated = validate_order(
            &request.order_items,
            &request.delivery,
            request.total_amount,
        )?;

        let order = self
            .store
            .replace_order(
                id,
                current.status,
                OrderReplacement {
                    status: next,
                    total_amount: validated.total_amount,
                    delivery: validated.delivery,
                    items: validated.items,
                },
            )
            .await?;

        tracing::info!(order_id = %id, status = %order.status, "Order replaced");
        Ok(order)
    }

    /// Moves an order to `next` along the status table. Asking for the
    /// current status is a successful no-op.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, next: OrderStatus) -> Result<(), OrderError> {
        let current = self.get_by_id(id).await?;
        if current.status == next {
            return Ok(());
        }
        check_transition(current.status, next)?;

        self.store.update_status(id, current.status, next).await?;

        metrics::counter!("order_status_updates_total", "status" => next.as_str()).increment(1);
        tracing::info!(order_id = %id, from = %current.status, to = %next, "Order status changed");
        Ok(())
    }

    /// Deletes an order and its lines.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.store.delete_order(id).await?;
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    /// Loads an order with its customer and lines.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        self.store
            .get_order(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    /// All orders of one customer, oldest first. Unknown customers have none.
    pub async fn get_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.list_orders_for_customer(customer_id).await?)
    }

    /// All orders, oldest first.
    pub async fn get_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.list_orders().await?)
    }
}

fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
    if from == to || from.can_transition_to(to) {
        Ok(())
    } else {
        Err(OrderError::IllegalTransition { from, to })
    }
}
