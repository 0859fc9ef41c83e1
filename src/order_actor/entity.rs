use chrono::Utc;

use super::actions::{OrderAction, StatusChange};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{CartItem, Order, OrderCreate, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    /// Line items are frozen at checkout; there is nothing to patch.
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = StatusChange;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Snapshots the cart lines and totals them. The order starts Pending.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if let Some(line) = params.items.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "Line {} has zero quantity",
                line.item.id
            )));
        }

        let total = params.items.iter().map(CartItem::subtotal).sum();
        Ok(Self {
            id,
            items: params.items,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<StatusChange, OrderError> {
        let previous = self.status;
        match action {
            OrderAction::SetStatus(status) => self.status = status,
            OrderAction::ConfirmIfPending => {
                if self.status == OrderStatus::Pending {
                    self.status = OrderStatus::Confirmed;
                }
            }
        }
        Ok(StatusChange {
            previous,
            current: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuItem;

    fn line(id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem {
            item: MenuItem {
                id: id.into(),
                name: id.into(),
                description: String::new(),
                price,
                category: "Tacos".into(),
                image: String::new(),
                rating: 0.0,
                reviews: Vec::new(),
                is_spicy: false,
                is_veg: false,
            },
            quantity,
        }
    }

    fn placed() -> Order {
        let params = OrderCreate {
            items: vec![line("1", 9.5, 2), line("2", 7.0, 1)],
        };
        Order::from_create_params("ORD-1".into(), params).unwrap()
    }

    #[test]
    fn new_orders_are_pending_with_computed_total() {
        let order = placed();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 26.0);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let err = Order::from_create_params("ORD-1".into(), OrderCreate { items: Vec::new() })
            .unwrap_err();
        assert_eq!(err, OrderError::EmptyCart);
    }

    #[test]
    fn manual_status_changes_are_unconstrained() {
        let mut order = placed();
        order.handle_action(OrderAction::SetStatus(OrderStatus::Delivered)).unwrap();
        let change = order
            .handle_action(OrderAction::SetStatus(OrderStatus::Preparing))
            .unwrap();
        assert!(change.is_regression());
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[test]
    fn auto_confirm_only_moves_pending_orders() {
        let mut order = placed();
        let change = order.handle_action(OrderAction::ConfirmIfPending).unwrap();
        assert!(change.changed());
        assert_eq!(order.status, OrderStatus::Confirmed);

        order.handle_action(OrderAction::SetStatus(OrderStatus::Ready)).unwrap();
        let change = order.handle_action(OrderAction::ConfirmIfPending).unwrap();
        assert!(!change.changed());
        assert_eq!(order.status, OrderStatus::Ready);
    }
}
