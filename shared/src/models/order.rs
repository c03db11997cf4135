//! Order Model
//!
//! Orders embed a snapshot of each product at checkout time, so later catalog
//! edits never rewrite history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::product::Product;

/// Order lifecycle status
///
/// Linear: `pending -> preparing -> out_for_delivery -> delivered`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Next status in the lifecycle, `None` once delivered
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Customer facing label (pt-BR)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Preparing => "Em Preparação",
            Self::OutForDelivery => "Saiu para Entrega",
            Self::Delivered => "Entregue",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderStatus(pub String);

impl fmt::Display for InvalidOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order status: {}", self.0)
    }
}

impl std::error::Error for InvalidOrderStatus {}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidOrderStatus(s.to_string()))
    }
}

/// How the customer receives the cylinder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

/// Who placed the order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderSource {
    /// Public storefront checkout (decrements stock)
    #[default]
    Storefront,
    /// Staff entered order (stock untouched)
    Staff,
}

/// Payment method keys
pub const PAYMENT_CASH: &str = "dinheiro";
pub const PAYMENT_PIX: &str = "pix";
pub const PAYMENT_CARD: &str = "cartao";

/// Delivery address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub cep: String,
    pub complement: Option<String>,
    pub reference: Option<String>,
}

/// Customer data captured with the order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Address,
}

/// Product data frozen at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    pub weight: String,
    pub pickup_price: f64,
    pub delivery_price: f64,
}

impl ProductSnapshot {
    pub fn price_for(&self, delivery_type: DeliveryType) -> f64 {
        match delivery_type {
            DeliveryType::Delivery => self.delivery_price,
            DeliveryType::Pickup => self.pickup_price,
        }
    }
}

impl From<&Product> for ProductSnapshot {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            weight: p.weight.clone(),
            pickup_price: p.pickup_price,
            delivery_price: p.delivery_price,
        }
    }
}

/// Order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductSnapshot,
    pub quantity: i64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Six digit human facing number, unique across orders
    pub order_number: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub customer: Customer,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderItem>,
    pub delivery_type: DeliveryType,
    pub payment_method: String,
    pub needs_change: bool,
    /// Bill the customer pays with, free text as typed
    pub change_amount: String,
    pub notes: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub created_at: i64,
    /// Set only while status is `delivered`
    pub delivery_date: Option<i64>,
    pub source: OrderSource,
}

/// Cart line submitted at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// Checkout payload (storefront and staff)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub items: Vec<CheckoutLine>,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    pub payment_method: String,
    #[serde(default)]
    pub needs_change: bool,
    #[serde(default)]
    pub change_amount: String,
    #[serde(default)]
    pub notes: String,
}

/// Checkout result: the stored order plus the WhatsApp hand-off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub whatsapp_message: String,
    pub whatsapp_url: String,
}

/// Manual status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Order listing filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Matches customer name, phone, id or order number
    pub search: Option<String>,
    /// `all` (or absent) or a status key
    pub status: Option<String>,
}

impl OrderQuery {
    /// Parsed status filter, `None` means every status
    pub fn status_filter(&self) -> Result<Option<OrderStatus>, InvalidOrderStatus> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// Whether `order` passes both filters
    pub fn matches(&self, order: &Order, status: Option<OrderStatus>) -> bool {
        if let Some(wanted) = status
            && order.status != wanted
        {
            return false;
        }
        let term = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(t) => t,
        };
        order
            .customer
            .name
            .to_lowercase()
            .contains(&term.to_lowercase())
            || order.customer.phone.contains(term)
            || order.id.to_string().contains(term)
            || order.order_number.to_string().contains(term)
    }
}

/// Public store information for the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontInfo {
    pub store_name: String,
    pub whatsapp_number: String,
    pub pix_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_progression() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Preparing));
        assert_eq!(
            OrderStatus::Preparing.next(),
            Some(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            OrderStatus::OutForDelivery.next(),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_status_parse_and_serde() {
        assert_eq!(
            "out_for_delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out_for_delivery\""
        );
    }

    #[test]
    fn test_snapshot_price_for() {
        let snap = ProductSnapshot {
            id: 1,
            name: "Botijão P13".into(),
            weight: "13".into(),
            pickup_price: 95.0,
            delivery_price: 105.0,
        };
        assert_eq!(snap.price_for(DeliveryType::Pickup), 95.0);
        assert_eq!(snap.price_for(DeliveryType::Delivery), 105.0);
    }

    fn order(name: &str, phone: &str, number: i64, status: OrderStatus) -> Order {
        Order {
            id: 900_001,
            order_number: number,
            customer: Customer {
                name: name.into(),
                phone: phone.into(),
                address: Address::default(),
            },
            items: vec![],
            delivery_type: DeliveryType::Pickup,
            payment_method: PAYMENT_PIX.into(),
            needs_change: false,
            change_amount: String::new(),
            notes: String::new(),
            status,
            total_amount: 0.0,
            created_at: 0,
            delivery_date: None,
            source: OrderSource::Staff,
        }
    }

    #[test]
    fn test_order_query_status_filter() {
        let all = OrderQuery {
            search: None,
            status: Some("all".into()),
        };
        assert_eq!(all.status_filter(), Ok(None));
        let delivered = OrderQuery {
            search: None,
            status: Some("delivered".into()),
        };
        assert_eq!(delivered.status_filter(), Ok(Some(OrderStatus::Delivered)));
        let bad = OrderQuery {
            search: None,
            status: Some("lost".into()),
        };
        assert!(bad.status_filter().is_err());
    }

    #[test]
    fn test_order_query_search() {
        let o = order("Maria Souza", "32991440248", 482913, OrderStatus::Pending);
        let q = |s: &str| OrderQuery {
            search: Some(s.into()),
            status: None,
        };
        assert!(q("maria").matches(&o, None));
        assert!(q("SOUZA").matches(&o, None));
        assert!(q("99144").matches(&o, None));
        assert!(q("4829").matches(&o, None));
        assert!(q("900001").matches(&o, None));
        assert!(!q("joão").matches(&o, None));
        assert!(q("").matches(&o, None));
        assert!(!q("maria").matches(&o, Some(OrderStatus::Delivered)));
    }

    #[test]
    fn test_checkout_request_defaults() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{"customer":{"name":"Ana","phone":"32991440248"},
                "items":[{"product_id":1,"quantity":2}],
                "payment_method":"pix"}"#,
        )
        .unwrap();
        assert_eq!(req.delivery_type, DeliveryType::Delivery);
        assert!(!req.needs_change);
        assert_eq!(req.customer.address, Address::default());
    }
}
