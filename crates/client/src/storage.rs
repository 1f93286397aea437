//! Local persistence of the cart.
//!
//! The stored document is the JSON the web storefront keeps under its cart
//! key: `{"items": [{"id", "name", "price", "imageUrl", "quantity"}], "total"}`.
//! Reading is lenient. Lines that do not have the expected shape are dropped,
//! and a document that cannot be read at all gives an empty cart.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, MAX_QUANTITY};
use crate::error::ClientError;

/// Where a cart is kept between runs.
pub trait CartStorage: Send + Sync {
    fn load(&self) -> Result<Cart, ClientError>;

    fn save(&self, cart: &Cart) -> Result<(), ClientError>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    id: ProductId,
    name: String,
    price: Money,
    #[serde(default)]
    image_url: Option<String>,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct StoredCart {
    items: Vec<StoredLine>,
    total: Money,
}

/// Serializes a cart into the stored document.
pub fn encode_cart(cart: &Cart) -> Result<String, ClientError> {
    let document = StoredCart {
        items: cart
            .lines()
            .iter()
            .map(|line| StoredLine {
                id: line.product_id,
                name: line.name.clone(),
                price: line.unit_price,
                image_url: line.image_url.clone(),
                quantity: line.quantity,
            })
            .collect(),
        total: cart.total(),
    };
    Ok(serde_json::to_string(&document)?)
}

/// Reads a stored document. The stored total is ignored and recomputed.
pub fn decode_cart(document: &str) -> Cart {
    let value: serde_json::Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Stored cart is not valid JSON, starting empty");
            return Cart::new();
        }
    };

    let Some(items) = value.get("items").and_then(|items| items.as_array()) else {
        tracing::warn!("Stored cart has no item list, starting empty");
        return Cart::new();
    };

    let mut seen = HashSet::new();
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let Ok(stored) = serde_json::from_value::<StoredLine>(item.clone()) else {
            tracing::debug!(item = %item, "Dropping malformed cart line");
            continue;
        };
        if !stored.id.is_valid()
            || stored.name.trim().is_empty()
            || stored.price.is_negative()
            || stored.quantity == 0
            || !seen.insert(stored.id)
        {
            tracing::debug!(product_id = %stored.id, "Dropping invalid cart line");
            continue;
        }
        lines.push(CartLine {
            product_id: stored.id,
            name: stored.name,
            unit_price: stored.price,
            quantity: stored.quantity.min(MAX_QUANTITY),
            image_url: stored.image_url,
        });
    }

    Cart::from_lines(lines)
}

/// Keeps the cart document in a file.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Cart, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(document) => Ok(decode_cart(&document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), ClientError> {
        let document = encode_cart(cart)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, document)?;
        Ok(())
    }
}

/// Keeps the cart document in memory, optionally with a size quota the way
/// browser storage has one.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    document: Mutex<Option<String>>,
    quota: Option<usize>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses documents longer than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            document: Mutex::new(None),
            quota: Some(bytes),
        }
    }

    /// Storage pre-filled with a raw document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            quota: None,
        }
    }

    /// The raw stored document, if anything was saved.
    pub fn document(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Cart, ClientError> {
        Ok(self
            .lock()
            .as_deref()
            .map(decode_cart)
            .unwrap_or_default())
    }

    fn save(&self, cart: &Cart) -> Result<(), ClientError> {
        let document = encode_cart(cart)?;
        if let Some(quota) = self.quota
            && document.len() > quota
        {
            return Err(ClientError::Storage(std::io::Error::other(format!(
                "cart document of {} bytes exceeds quota of {quota} bytes",
                document.len()
            ))));
        }
        *self.lock() = Some(document);
        Ok(())
    }
}
