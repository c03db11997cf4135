//! GET /api/admin/orders/live - Server-Sent Events
//!
//! The stream opens with one `snapshot` event (every order plus stats) and
//! then emits a `sync` event per order change. A subscriber that falls
//! behind the bus gets a `resync` event and should reload.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono::Local;
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use shared::message::resource;
use shared::models::{Order, OrderStats};
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders::order_stats;
use crate::utils::{AppError, AppResult};

pub const EVENT_SNAPSHOT: &str = "snapshot";
pub const EVENT_SYNC: &str = "sync";
pub const EVENT_RESYNC: &str = "resync";

#[derive(Debug, Serialize)]
struct LiveSnapshot {
    orders: Vec<Order>,
    stats: OrderStats,
}

pub async fn live(
    State(state): State<ServerState>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // Subscribe before reading so no change falls between snapshot and feed
    let rx = state.message_bus.subscribe();

    let orders = order_repo::find_all(&state.db.pool).await?;
    let stats = order_stats(&orders, &Local::now());
    let snapshot = Event::default()
        .event(EVENT_SNAPSHOT)
        .json_data(LiveSnapshot { orders, stats })
        .map_err(|e| AppError::internal(format!("Failed to encode snapshot: {e}")))?;

    tracing::debug!(subscribers = state.message_bus.subscriber_count(), "Live order feed opened");

    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(payload) if payload.resource == resource::ORDER => {
                    match Event::default().event(EVENT_SYNC).json_data(&payload) {
                        Ok(event) => return Some((Ok(event), rx)),
                        Err(e) => tracing::warn!("Failed to encode sync event: {}", e),
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Live order feed lagged");
                    let event = Event::default()
                        .event(EVENT_RESYNC)
                        .data(skipped.to_string());
                    return Some((Ok(event), rx));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = stream::once(async move { Ok(snapshot) }).chain(updates);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
