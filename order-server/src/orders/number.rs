//! Order number generation
//!
//! Six digit numbers drawn uniformly at random and checked against the
//! store. The UNIQUE index on `orders.order_number` stays the final arbiter.

use rand::Rng;
use sqlx::SqliteConnection;

use crate::db::repository::order as order_repo;
use crate::utils::{AppError, AppResult, ErrorCode};

pub const ORDER_NUMBER_MIN: i64 = 100_000;
pub const ORDER_NUMBER_MAX: i64 = 999_999;

/// Draws before giving up with `OrderNumberExhausted`
pub const MAX_ORDER_NUMBER_ATTEMPTS: usize = 32;

/// Draw order numbers until one is not taken.
pub async fn generate_unique_order_number<R>(
    conn: &mut SqliteConnection,
    rng: &mut R,
) -> AppResult<i64>
where
    R: Rng + Send,
{
    for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
        let candidate = rng.gen_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX);
        if !order_repo::order_number_exists(&mut *conn, candidate).await? {
            return Ok(candidate);
        }
        tracing::debug!(candidate, attempt, "Order number collision, drawing again");
    }

    tracing::error!(
        attempts = MAX_ORDER_NUMBER_ATTEMPTS,
        "Could not draw a free order number"
    );
    Err(AppError::new(ErrorCode::OrderNumberExhausted)
        .with_detail("attempts", MAX_ORDER_NUMBER_ATTEMPTS))
}
