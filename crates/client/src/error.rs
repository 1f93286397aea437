use common::ProductId;
use thiserror::Error;

/// Errors from cart actions. The cart is left untouched when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Product {0} cannot be added to the cart")]
    InvalidProduct(ProductId),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the credentials or the bearer token.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Je moet ingelogd zijn om te bestellen.")]
    NotLoggedIn,

    #[error("Je winkelwagen is leeg.")]
    EmptyCart,

    #[error("Missing delivery fields: {}", .0.join(", "))]
    MissingDelivery(Vec<&'static str>),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Cart(#[from] CartError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// HTTP status of a server-side rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
