//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::price::PriceValue;

/// Order status
///
/// The backend stores status as a free-form string. Known values map to
/// dedicated variants, anything else is kept verbatim in [`OrderStatus::Other`]
/// so that it can round-trip and be displayed unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Linear progression used when staff advance an order.
    pub const PROGRESSION: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Next status in the progression.
    ///
    /// `Delivered` is terminal. Statuses outside the progression (cancelled or
    /// unknown) are returned unchanged.
    pub fn next(&self) -> OrderStatus {
        match Self::PROGRESSION.iter().position(|s| s == self) {
            Some(idx) if idx + 1 < Self::PROGRESSION.len() => Self::PROGRESSION[idx + 1].clone(),
            _ => self.clone(),
        }
    }

    /// Human-readable decorated label. Unknown statuses pass through as their raw string.
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "⏳ Pending",
            OrderStatus::Preparing => "👨‍🍳 Preparing",
            OrderStatus::Ready => "✅ Ready",
            OrderStatus::Delivered => "🎉 Delivered",
            other => other.as_str(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        OrderStatus::from(raw.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: i64,
    pub quantity: i32,
    /// Unit price at the time of ordering
    pub price: PriceValue,
    /// Product name (joined by the backend)
    #[serde(default)]
    pub name: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    pub status: OrderStatus,
    pub total_price: PriceValue,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdateStatus {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_status_progression() {
        assert_eq!(OrderStatus::Pending.next(), OrderStatus::Preparing);
        assert_eq!(OrderStatus::Preparing.next(), OrderStatus::Ready);
        assert_eq!(OrderStatus::Ready.next(), OrderStatus::Delivered);
    }

    #[test]
    fn test_next_status_terminal_and_unknown() {
        assert_eq!(OrderStatus::Delivered.next(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Delivered.next().next(), OrderStatus::Delivered);
        assert_eq!(OrderStatus::Cancelled.next(), OrderStatus::Cancelled);

        let unknown = OrderStatus::from("on_hold");
        assert_eq!(unknown.next(), OrderStatus::Other("on_hold".into()));
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Pending.label(), "⏳ Pending");
        assert_eq!(OrderStatus::Delivered.label(), "🎉 Delivered");
        assert_eq!(OrderStatus::Cancelled.label(), "cancelled");
        assert_eq!(OrderStatus::from("on_hold").label(), "on_hold");
    }

    #[test]
    fn test_status_wire_format() {
        let status: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(status, OrderStatus::Ready);

        let other: OrderStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"refunded\"");

        let body = serde_json::to_value(OrderUpdateStatus {
            status: OrderStatus::Preparing,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "preparing" }));
    }

    #[test]
    fn test_order_decodes_backend_row() {
        let json = serde_json::json!({
            "id": 7,
            "order_number": "ORD-20250101-1234",
            "status": "pending",
            "total_price": "12.50",
            "created_at": "Wed, 01 Jan 2025 12:00:00 GMT",
            "updated_at": "Wed, 01 Jan 2025 12:00:00 GMT",
            "items": [
                { "id": 1, "order_id": 7, "product_id": 3, "quantity": 2, "price": 6.25, "name": "Cheese Burger" }
            ]
        });

        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name.as_deref(), Some("Cheese Burger"));
        assert_eq!(order.total_price.parse().unwrap().to_string(), "12.50");
    }

    #[test]
    fn test_order_without_status_is_rejected() {
        let json = serde_json::json!({ "id": 1, "total_price": 3.0 });
        assert!(serde_json::from_value::<Order>(json).is_err());
    }
}
