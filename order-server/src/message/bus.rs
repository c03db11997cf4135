//! 消息总线核心实现
//!
//! ```text
//! write path ──▶ publish() ──▶ broadcast::Sender<SyncPayload>
//!                                      │
//!                      ┌───────────────┼───────────────┐
//!                      ▼               ▼               ▼
//!                 SSE stream      SSE stream        tests
//! ```
//!
//! Slow subscribers lag instead of blocking publishers; they see
//! `RecvError::Lagged` and are expected to resync from a snapshot.

use tokio::sync::broadcast;

use super::SyncPayload;

/// Default capacity of the broadcast channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// 消息总线 - 服务器到所有订阅者的广播
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<SyncPayload>,
}

impl MessageBus {
    /// 创建默认配置的消息总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 发布消息 (服务器 -> 所有订阅者)
    ///
    /// Returns the number of subscribers that received it. Publishing with
    /// nobody listening is not an error.
    pub fn publish(&self, payload: SyncPayload) -> usize {
        match self.tx.send(payload) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(payload)) => {
                tracing::trace!(resource = %payload.resource, "No live subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
