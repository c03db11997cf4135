//! Dashboard statistics
//!
//! One pass over the order list.

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use shared::models::{Order, OrderStats, OrderStatus};

use super::money::{to_decimal, to_f64};

/// Status counts plus revenue of orders created on `now`'s calendar day.
///
/// The day boundary is taken in `now`'s timezone (the server uses `Local`).
pub fn order_stats<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> OrderStats {
    let today = now.date_naive();
    let tz = now.timezone();

    let mut stats = OrderStats {
        total: orders.len(),
        ..Default::default()
    };
    let mut revenue = Decimal::ZERO;

    for order in orders {
        match order.status {
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::Preparing => stats.preparing += 1,
            OrderStatus::OutForDelivery => stats.out_for_delivery += 1,
            OrderStatus::Delivered => stats.delivered += 1,
        }

        let created_today = tz
            .timestamp_millis_opt(order.created_at)
            .single()
            .is_some_and(|created| created.date_naive() == today);
        if created_today {
            revenue += to_decimal(order.total_amount);
        }
    }

    stats.today_revenue = to_f64(revenue);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use shared::models::{Customer, DeliveryType, OrderSource};

    fn order(status: OrderStatus, total: f64, created_at: i64) -> Order {
        Order {
            id: created_at,
            order_number: 100_000,
            customer: Customer::default(),
            items: vec![],
            delivery_type: DeliveryType::Delivery,
            payment_method: "pix".into(),
            needs_change: false,
            change_amount: String::new(),
            notes: String::new(),
            status,
            total_amount: total,
            created_at,
            delivery_date: None,
            source: OrderSource::Storefront,
        }
    }

    #[test]
    fn test_counts_by_status() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let ms = now.timestamp_millis();
        let orders = vec![
            order(OrderStatus::Pending, 10.0, ms),
            order(OrderStatus::Pending, 10.0, ms),
            order(OrderStatus::Preparing, 10.0, ms),
            order(OrderStatus::OutForDelivery, 10.0, ms),
            order(OrderStatus::Delivered, 10.0, ms),
        ];
        let stats = order_stats(&orders, &now);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.preparing, 1);
        assert_eq!(stats.out_for_delivery, 1);
        assert_eq!(stats.delivered, 1);
    }

    #[test]
    fn test_today_revenue_only_counts_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 59).unwrap();
        let morning = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let orders = vec![
            order(OrderStatus::Delivered, 105.10, morning.timestamp_millis()),
            order(OrderStatus::Pending, 95.20, now.timestamp_millis()),
            order(OrderStatus::Delivered, 400.0, yesterday.timestamp_millis()),
        ];
        let stats = order_stats(&orders, &now);
        assert_eq!(stats.today_revenue, 200.30);
    }

    #[test]
    fn test_day_boundary_follows_timezone() {
        // 02:00 UTC on the 10th is still the 9th in Brasília (UTC-3)
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let created = Utc.with_ymd_and_hms(2026, 3, 10, 2, 0, 0).unwrap();
        let now = brt.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let orders = vec![order(OrderStatus::Pending, 50.0, created.timestamp_millis())];
        assert_eq!(order_stats(&orders, &now).today_revenue, 0.0);
    }

    #[test]
    fn test_empty_list() {
        let now = Utc::now();
        assert_eq!(order_stats(&[], &now), OrderStats::default());
    }
}
