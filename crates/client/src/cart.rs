//! Shopping cart state and the actions that change it.
//!
//! Every change goes through a [`CartAction`]; applying one returns the
//! notices a storefront shows to the shopper. The total is never stored, it
//! is folded from the lines whenever it is asked for.

use common::{Money, Product, ProductId};

use crate::error::CartError;

/// Highest quantity a single cart line can hold.
pub const MAX_QUANTITY: u32 = 99;

/// One product in the cart, with the name and price as they were when the
/// shopper added it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add `quantity` of a product. Non-positive quantities count as one.
    Add { product: Product, quantity: i64 },
    /// Add `delta` to a line's quantity. Reaching zero removes the line.
    ChangeQuantity { product_id: ProductId, delta: i64 },
    Increase(ProductId),
    Decrease(ProductId),
    /// Overwrite a line's quantity. Zero or less removes the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    Remove(ProductId),
    Clear,
}

/// Message for the shopper produced by a cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    Added { name: String },
    MaxQuantityReached,
    Removed { name: String },
    Cleared,
    SaveFailed,
}

impl CartNotice {
    /// Notices the shopper should read as a warning rather than a confirmation.
    pub fn is_warning(&self) -> bool {
        matches!(self, CartNotice::MaxQuantityReached | CartNotice::SaveFailed)
    }
}

impl std::fmt::Display for CartNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartNotice::Added { name } => write!(f, "{name} is toegevoegd aan je winkelwagen."),
            CartNotice::MaxQuantityReached => write!(
                f,
                "Maximum aantal van {MAX_QUANTITY} bereikt voor dit product."
            ),
            CartNotice::Removed { name } => {
                write!(f, "{name} is verwijderd uit je winkelwagen.")
            }
            CartNotice::Cleared => write!(f, "Je winkelwagen is leeggemaakt."),
            CartNotice::SaveFailed => write!(
                f,
                "De winkelwagen kon niet worden opgeslagen. Probeer enkele items te verwijderen."
            ),
        }
    }
}

/// The shopper's cart. Lines keep insertion order and each product appears
/// at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from lines that are already known to be valid.
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn apply(&mut self, action: CartAction) -> Result<Vec<CartNotice>, CartError> {
        match action {
            CartAction::Add { product, quantity } => self.add_line(&product, quantity),
            CartAction::ChangeQuantity { product_id, delta } => {
                Ok(self.change_quantity(product_id, delta))
            }
            CartAction::Increase(product_id) => Ok(self.increase(product_id)),
            CartAction::Decrease(product_id) => Ok(self.decrease(product_id)),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => Ok(self.set_quantity(product_id, quantity)),
            CartAction::Remove(product_id) => Ok(self.remove_line(product_id)),
            CartAction::Clear => Ok(self.clear()),
        }
    }

    /// Adds a product, merging with an existing line for the same product.
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<Vec<CartNotice>, CartError> {
        if !product.id.is_valid() || product.name.trim().is_empty() || product.price.is_negative()
        {
            return Err(CartError::InvalidProduct(product.id));
        }

        let requested = quantity.max(1);
        let mut notices = Vec::new();

        match self.position(product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = capped(i64::from(line.quantity).saturating_add(requested));
                if line.quantity == MAX_QUANTITY {
                    notices.push(CartNotice::MaxQuantityReached);
                }
            }
            None => {
                if requested > i64::from(MAX_QUANTITY) {
                    notices.push(CartNotice::MaxQuantityReached);
                }
                self.lines.push(CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: capped(requested),
                    image_url: product.image_url.clone(),
                });
            }
        }

        notices.push(CartNotice::Added {
            name: product.name.clone(),
        });
        Ok(notices)
    }

    /// Moves a line's quantity by `delta`. Products not in the cart are ignored.
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> Vec<CartNotice> {
        let Some(index) = self.position(product_id) else {
            return Vec::new();
        };

        let target = i64::from(self.lines[index].quantity).saturating_add(delta);
        if target <= 0 {
            self.lines.remove(index);
            return Vec::new();
        }
        self.lines[index].quantity = capped(target);
        if target > i64::from(MAX_QUANTITY) {
            vec![CartNotice::MaxQuantityReached]
        } else {
            Vec::new()
        }
    }

    pub fn increase(&mut self, product_id: ProductId) -> Vec<CartNotice> {
        self.change_quantity(product_id, 1)
    }

    pub fn decrease(&mut self, product_id: ProductId) -> Vec<CartNotice> {
        self.change_quantity(product_id, -1)
    }

    /// Sets a line's quantity outright, as the quantity field on a cart page does.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Vec<CartNotice> {
        let Some(index) = self.position(product_id) else {
            return Vec::new();
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return Vec::new();
        }
        self.lines[index].quantity = capped(quantity);
        if quantity > i64::from(MAX_QUANTITY) {
            vec![CartNotice::MaxQuantityReached]
        } else {
            Vec::new()
        }
    }

    pub fn remove_line(&mut self, product_id: ProductId) -> Vec<CartNotice> {
        match self.position(product_id) {
            Some(index) => {
                let line = self.lines.remove(index);
                vec![CartNotice::Removed { name: line.name }]
            }
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self) -> Vec<CartNotice> {
        self.lines.clear();
        vec![CartNotice::Cleared]
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }
}

fn capped(quantity: i64) -> u32 {
    quantity.clamp(1, i64::from(MAX_QUANTITY)) as u32
}
