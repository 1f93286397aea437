//! Turning the cart into an order.

use common::api::{OrderLineRequest, PlaceOrderRequest};
use common::{CustomerId, DeliveryInfo, Order};

use crate::api_client::OrderGateway;
use crate::cart::{Cart, CartNotice};
use crate::cart_store::CartStore;
use crate::error::ClientError;
use crate::session::Session;
use crate::storage::CartStorage;

/// Builds the checkout body from a cart snapshot.
pub fn build_order_request(
    customer_id: CustomerId,
    cart: &Cart,
    delivery: DeliveryInfo,
) -> Result<PlaceOrderRequest, ClientError> {
    if cart.is_empty() {
        return Err(ClientError::EmptyCart);
    }
    let missing = delivery.missing_fields();
    if !missing.is_empty() {
        return Err(ClientError::MissingDelivery(missing));
    }

    Ok(PlaceOrderRequest {
        customer_id,
        order_items: cart
            .lines()
            .iter()
            .map(|line| OrderLineRequest {
                product_id: line.product_id,
                quantity: i64::from(line.quantity),
                unit_price: line.unit_price,
            })
            .collect(),
        total_amount: cart.total(),
        delivery,
    })
}

/// An accepted order and what clearing the cart reported.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub notices: Vec<CartNotice>,
}

impl CheckoutReceipt {
    /// False when the emptied cart could not be saved, so the old cart
    /// document would come back on the next start.
    pub fn cart_saved(&self) -> bool {
        !self.notices.contains(&CartNotice::SaveFailed)
    }
}

/// Places an order for the cart contents.
///
/// The cart is cleared only after the server accepted the order; on any
/// failure it is left as it was. A 401 answer also ends the session.
pub async fn checkout<G, P>(
    gateway: &G,
    session: &mut Session,
    cart: &mut CartStore<P>,
    delivery: DeliveryInfo,
) -> Result<CheckoutReceipt, ClientError>
where
    G: OrderGateway + ?Sized,
    P: CartStorage,
{
    let (Some(token), Some(customer_id)) = (session.token(), session.customer_id()) else {
        return Err(ClientError::NotLoggedIn);
    };

    let request = build_order_request(customer_id, cart.cart(), delivery)?;
    match gateway.place_order(token, &request).await {
        Ok(order) => {
            let notices = cart.clear();
            tracing::info!(order_id = %order.id, total = %order.total_amount, "Checkout completed");
            let receipt = CheckoutReceipt { order, notices };
            if !receipt.cart_saved() {
                tracing::warn!(order_id = %receipt.order.id, "Order placed but the emptied cart was not saved");
            }
            Ok(receipt)
        }
        Err(e) => {
            if e.is_unauthorized() {
                tracing::info!("Session rejected at checkout, logging out");
                session.clear();
            }
            Err(e)
        }
    }
}
