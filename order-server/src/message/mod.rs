//! In-process change feed
//!
//! Every write path publishes a [`SyncPayload`] on the [`MessageBus`];
//! live HTTP streams subscribe to it.

mod bus;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, MessageBus};
pub use shared::message::SyncPayload;
