use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Token ids that were logged out before their expiry.
///
/// Entries are dropped once the token would have expired anyway, so the list
/// only ever holds live tokens.
#[derive(Debug, Clone, Default)]
pub struct RevocationList {
    entries: Arc<RwLock<HashMap<String, i64>>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes `jti` until `expires_at` (unix seconds).
    pub async fn revoke(&self, jti: &str, expires_at: i64, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        let now = now.timestamp();
        entries.retain(|_, exp| *exp > now);
        if expires_at > now {
            entries.insert(jti.to_string(), expires_at);
        }
    }

    pub async fn is_revoked(&self, jti: &str, now: DateTime<Utc>) -> bool {
        let entries = self.entries.read().await;
        entries
            .get(jti)
            .is_some_and(|exp| *exp > now.timestamp())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
