//! Materialized order graph as returned by the read paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountView, CustomerId, Money, OrderId, OrderStatus, ProductId};

/// Where an order goes. Copied from the checkout request and independent of
/// the address stored on the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    #[serde(rename = "deliveryAddress", default)]
    pub address: String,
    #[serde(rename = "deliveryPostalCode", default)]
    pub postal_code: String,
    #[serde(rename = "deliveryCity", default)]
    pub city: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DeliveryInfo {
    pub fn new(
        address: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.address.trim().is_empty() {
            missing.push("deliveryAddress");
        }
        if self.postal_code.trim().is_empty() {
            missing.push("deliveryPostalCode");
        }
        if self.city.trim().is_empty() {
            missing.push("deliveryCity");
        }
        missing
    }
}

/// Catalog product as attached to an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One line of a persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price snapshot taken at checkout; later catalog changes never touch it.
    pub unit_price: Money,
    /// Current catalog entry, `None` when the catalog no longer lists it.
    #[serde(default)]
    pub product: Option<Product>,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            product: None,
        }
    }

    /// Returns the total price for this line (quantity * unit_price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A persisted order with its customer and lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub total_amount: Money,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub delivery: DeliveryInfo,
    #[serde(default)]
    pub customer: Option<AccountView>,
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Sum of the line totals. Equals `total_amount` for every order the
    /// server accepted.
    pub fn items_total(&self) -> Money {
        self.order_items.iter().map(OrderItem::line_total).sum()
    }

    pub fn total_quantity(&self) -> u32 {
        self.order_items.iter().map(|item| item.quantity).sum()
    }
}
