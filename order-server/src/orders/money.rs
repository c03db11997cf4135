//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use std::collections::HashMap;

use rust_decimal::prelude::*;
use shared::models::{CheckoutLine, DeliveryType, Product};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Order total: sum of `quantity × price`, price picked by delivery type.
///
/// Lines whose product is not in `products` contribute nothing.
pub fn compute_total(
    lines: &[CheckoutLine],
    products: &HashMap<i64, Product>,
    delivery_type: DeliveryType,
) -> f64 {
    let total = lines
        .iter()
        .filter_map(|line| {
            products.get(&line.product_id).map(|product| {
                to_decimal(product.price_for(delivery_type)) * Decimal::from(line.quantity)
            })
        })
        .sum::<Decimal>();
    to_f64(total)
}

/// Price rendered the way receipts show it: `R$ 105.00`
pub fn format_brl(value: f64) -> String {
    format!("R$ {:.2}", to_f64(to_decimal(value)))
}
