use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy)]
pub enum OrderAction {
    /// Admin override. Any status may be set from any other, including backwards.
    SetStatus(OrderStatus),
    /// Fired by the auto-confirm timer. Only moves an order that is still Pending.
    ConfirmIfPending,
}

/// Outcome of a status action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusChange {
    pub previous: OrderStatus,
    pub current: OrderStatus,
}

impl StatusChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }

    pub fn is_regression(&self) -> bool {
        self.current < self.previous
    }
}
