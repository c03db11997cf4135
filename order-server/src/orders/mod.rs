//! Orders
//!
//! Checkout, numbering, pricing and lifecycle of gas orders.

pub mod checkout;
pub mod money;
pub mod number;
pub mod stats;
pub mod status;

pub use checkout::{checkout, normalize_checkout};
pub use money::{compute_total, format_brl};
pub use number::generate_unique_order_number;
pub use stats::order_stats;
pub use status::{advance_status, get_order, list_orders, update_status};
