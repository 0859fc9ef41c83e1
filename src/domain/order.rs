use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CartItem;

/// Order lifecycle, in intended forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Number of steps on the customer-facing tracker.
    pub const TRACKER_STEPS: usize = 4;

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// The next stage in forward order; `None` once delivered.
    pub fn next(self) -> Option<OrderStatus> {
        let index = Self::ALL.iter().position(|&s| s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Delivered is the only terminal state.
    pub fn is_active(self) -> bool {
        self != OrderStatus::Delivered
    }

    /// Step lit on the Confirmed / Cooking / On Way / Delivered tracker. Pending lights nothing.
    pub fn tracker_step(self) -> Option<usize> {
        match self {
            OrderStatus::Pending => None,
            OrderStatus::Confirmed => Some(0),
            OrderStatus::Preparing | OrderStatus::Ready => Some(1),
            OrderStatus::OutForDelivery => Some(2),
            OrderStatus::Delivered => Some(3),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a placed order. Line items are a snapshot; only the status changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<CartItem>,
}

impl Order {
    /// Post-delivery review action is only offered once the order has arrived.
    pub fn can_review(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

/// Admin order list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl OrderFilter {
    pub fn accepts(self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Active => order.status.is_active(),
            OrderFilter::Completed => !order.status.is_active(),
        }
    }
}

/// Admin dashboard figures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderStats {
    pub order_count: usize,
    pub active_count: usize,
    pub completed_count: usize,
    pub revenue: f64,
    pub average_order_value: f64,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let revenue: f64 = orders.iter().map(|o| o.total).sum();
        let completed_count = orders.iter().filter(|o| !o.status.is_active()).count();
        let average_order_value = if orders.is_empty() {
            0.0
        } else {
            revenue / orders.len() as f64
        };
        Self {
            order_count: orders.len(),
            active_count: orders.len() - completed_count,
            completed_count,
            revenue,
            average_order_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, total: f64) -> Order {
        Order {
            id: "ORD-1".into(),
            items: Vec::new(),
            total,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn next_walks_forward_and_stops_at_delivered() {
        let mut walked = vec![OrderStatus::Pending];
        while let Some(next) = walked.last().and_then(|s| s.next()) {
            walked.push(next);
        }
        assert_eq!(walked, OrderStatus::ALL.to_vec());
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn tracker_folds_ready_into_cooking() {
        assert_eq!(OrderStatus::Pending.tracker_step(), None);
        assert_eq!(OrderStatus::Preparing.tracker_step(), OrderStatus::Ready.tracker_step());
        assert_eq!(
            OrderStatus::Delivered.tracker_step(),
            Some(OrderStatus::TRACKER_STEPS - 1)
        );
    }

    #[test]
    fn filters_split_on_delivered() {
        let delivered = order(OrderStatus::Delivered, 10.0);
        let cooking = order(OrderStatus::Preparing, 10.0);
        assert!(OrderFilter::Completed.accepts(&delivered));
        assert!(!OrderFilter::Active.accepts(&delivered));
        assert!(OrderFilter::Active.accepts(&cooking));
        assert!(OrderFilter::All.accepts(&cooking));
        assert!(delivered.can_review());
        assert!(!cooking.can_review());
    }

    #[test]
    fn stats_over_mixed_orders() {
        let orders = vec![
            order(OrderStatus::Delivered, 20.0),
            order(OrderStatus::Pending, 10.0),
            order(OrderStatus::OutForDelivery, 30.0),
        ];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.order_count, 3);
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.revenue, 60.0);
        assert_eq!(stats.average_order_value, 20.0);

        assert_eq!(OrderStats::from_orders(&[]), OrderStats::default());
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Out for Delivery");
    }
}
