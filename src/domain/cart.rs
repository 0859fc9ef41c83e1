use serde::{Deserialize, Serialize};

use super::MenuItem;

/// A menu item snapshot plus a quantity. Quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// The shopper's unsubmitted selection, keyed by menu item id, in the order lines were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit, merging into an existing line. Returns the line's new quantity.
    /// A line already at `u32::MAX` stays there.
    pub fn add(&mut self, item: MenuItem) -> u32 {
        if let Some(line) = self.line_mut(&item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartItem { item, quantity: 1 });
        1
    }

    /// Returns the removed line, if there was one.
    pub fn remove(&mut self, item_id: &str) -> Option<CartItem> {
        let index = self.lines.iter().position(|l| l.item.id == item_id)?;
        Some(self.lines.remove(index))
    }

    /// Applies `delta` only when the result lands in `1..=u32::MAX`; anything else leaves
    /// the line as it was, so decrementing never removes a line.
    /// Returns the resulting quantity, or `None` if the item is not in the cart.
    pub fn update_quantity(&mut self, item_id: &str, delta: i64) -> Option<u32> {
        let line = self.line_mut(item_id)?;
        let updated = i64::from(line.quantity)
            .checked_add(delta)
            .and_then(|q| u32::try_from(q).ok())
            .filter(|&q| q > 0);
        if let Some(quantity) = updated {
            line.quantity = quantity;
        }
        Some(line.quantity)
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartItem::subtotal).sum()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Empties the cart, handing back every line.
    pub fn take(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.lines)
    }

    /// Puts lines back after a failed checkout, merging quantities with anything added since.
    pub fn restore(&mut self, lines: Vec<CartItem>) {
        for restored in lines.into_iter().rev() {
            match self.line_mut(&restored.item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(restored.quantity),
                None => self.lines.insert(0, restored),
            }
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, item_id: &str) -> Option<&mut CartItem> {
        self.lines.iter_mut().find(|l| l.item.id == item_id)
    }
}
