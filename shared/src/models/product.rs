//! Product Model

use serde::{Deserialize, Serialize};

use super::order::DeliveryType;

/// Gas product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Cylinder weight label in kg (e.g. "13", "45")
    pub weight: String,
    /// Price when the customer picks the cylinder up
    pub pickup_price: f64,
    /// Price when the cylinder is delivered
    pub delivery_price: f64,
    /// Units in stock (may go negative after storefront checkouts)
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Unit price for the given delivery mode
    pub fn price_for(&self, delivery_type: DeliveryType) -> f64 {
        match delivery_type {
            DeliveryType::Delivery => self.delivery_price,
            DeliveryType::Pickup => self.pickup_price,
        }
    }

    /// Catalog search: case-insensitive on name, plain substring on weight
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || self.name.to_lowercase().contains(&term.to_lowercase())
            || self.weight.contains(term)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub weight: String,
    pub pickup_price: f64,
    pub delivery_price: f64,
    pub quantity: Option<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub weight: Option<String>,
    pub pickup_price: Option<f64>,
    pub delivery_price: Option<f64>,
    pub quantity: Option<i64>,
}

/// Catalog listing query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
}
