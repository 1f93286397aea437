//! Cart state holder: applies actions, persists, and tells subscribers.

use crate::cart::{Cart, CartAction, CartNotice};
use crate::error::CartError;
use crate::storage::CartStorage;

type Subscriber = Box<dyn Fn(&Cart, &[CartNotice]) + Send + Sync>;

/// Owns the shopper's cart.
///
/// Each dispatched action that changes the cart is written to storage before
/// subscribers are called. A failed write keeps the change in memory and adds
/// a [`CartNotice::SaveFailed`] notice.
pub struct CartStore<P> {
    cart: Cart,
    storage: P,
    subscribers: Vec<Subscriber>,
}

impl<P: CartStorage> CartStore<P> {
    /// Opens the cart kept in `storage`. Unreadable storage gives an empty cart.
    pub fn open(storage: P) -> Self {
        let cart = match storage.load() {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cart, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            subscribers: Vec::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &P {
        &self.storage
    }

    /// Registers a callback run after every dispatched action.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&Cart, &[CartNotice]) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn dispatch(&mut self, action: CartAction) -> Result<Vec<CartNotice>, CartError> {
        let before = self.cart.clone();
        let mut notices = self.cart.apply(action)?;

        if self.cart != before
            && let Err(e) = self.storage.save(&self.cart)
        {
            tracing::warn!(error = %e, "Failed to save cart");
            notices.push(CartNotice::SaveFailed);
        }

        for subscriber in &self.subscribers {
            subscriber(&self.cart, &notices);
        }
        Ok(notices)
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> Vec<CartNotice> {
        self.dispatch(CartAction::Clear).unwrap_or_default()
    }
}

impl<P> std::fmt::Debug for CartStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
