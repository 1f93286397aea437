//! Checks a checkout (or replacement) body before anything is written.

use common::api::OrderLineRequest;
use common::{DeliveryInfo, Money};
use store::NewOrderItem;

use crate::error::OrderError;

/// Largest quantity accepted on one order line (the `INT` column bound).
pub const MAX_LINE_QUANTITY: u32 = i32::MAX as u32;

/// Lines and delivery data that passed every check.
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    pub items: Vec<NewOrderItem>,
    pub delivery: DeliveryInfo,
    pub total_amount: Money,
}

/// Validates order lines, delivery fields and the claimed total.
///
/// The claimed total must equal the sum of `unit_price * quantity` over the
/// lines. Line order is kept; the same product may appear on several lines.
pub fn validate_order(
    lines: &[OrderLineRequest],
    delivery: &DeliveryInfo,
    total_amount: Money,
) -> Result<ValidatedOrder, OrderError> {
    if lines.is_empty() {
        return Err(OrderError::NoItems);
    }

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        if !line.product_id.is_valid() {
            return Err(OrderError::InvalidProduct(line.product_id));
        }
        let quantity = u32::try_from(line.quantity)
            .ok()
            .filter(|q| (1..=MAX_LINE_QUANTITY).contains(q))
            .ok_or(OrderError::InvalidQuantity {
                product_id: line.product_id,
                quantity: line.quantity,
            })?;
        if line.unit_price.is_negative() {
            return Err(OrderError::NegativePrice(line.product_id));
        }
        items.push(NewOrderItem::new(line.product_id, quantity, line.unit_price));
    }

    let missing = delivery.missing_fields();
    if !missing.is_empty() {
        return Err(OrderError::MissingDelivery(missing));
    }

    let expected = items
        .iter()
        .try_fold(Money::zero(), |sum, item| {
            item.unit_price
                .checked_multiply(item.quantity)
                .and_then(|line_total| sum.checked_add(line_total))
        })
        .ok_or(OrderError::AmountOverflow)?;
    if expected != total_amount {
        return Err(OrderError::TotalMismatch {
            expected,
            actual: total_amount,
        });
    }

    let mut delivery = delivery.clone();
    delivery.address = delivery.address.trim().to_string();
    delivery.postal_code = delivery.postal_code.trim().to_string();
    delivery.city = delivery.city.trim().to_string();
    delivery.notes = delivery
        .notes
        .take()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(ValidatedOrder {
        items,
        delivery,
        total_amount,
    })
}
