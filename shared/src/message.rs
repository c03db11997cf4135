//! Live feed payloads
//!
//! When a resource changes the server broadcasts a [`SyncPayload`] to every
//! subscribed staff client, which then patches or refetches its view.

use serde::{Deserialize, Serialize};

/// Resource names carried in `SyncPayload::resource`
pub mod resource {
    pub const ORDER: &str = "order";
    pub const PRODUCT: &str = "product";
    pub const PROFILE: &str = "profile";
}

/// Change kinds carried in `SyncPayload::action`
pub mod action {
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const DELETED: &str = "deleted";
}

/// Sync signal (server -> all clients)
///
/// # Example
/// - `resource`: "order"
/// - `version`: 42
/// - `action`: "updated"
/// - `id`: "153004119873536"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub resource: String,
    /// Per-resource counter, gaps tell the client it missed events
    pub version: u64,
    pub action: String,
    pub id: String,
    /// Entity after the change, `None` for deletions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SyncPayload {
    pub fn is_deletion(&self) -> bool {
        self.action == action::DELETED
    }
}
