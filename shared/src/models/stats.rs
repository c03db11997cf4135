//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Aggregate order counts for the staff dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub preparing: usize,
    pub out_for_delivery: usize,
    pub delivered: usize,
    /// Sum of `total_amount` for orders created today (local time)
    pub today_revenue: f64,
}
