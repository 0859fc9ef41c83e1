use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CartClient;
use crate::domain::{Cart, CartItem, MenuItem};
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

/// Owns the shopper's cart. Every request is applied whole before the next is read,
/// so checkout's `TakeAll` can never observe a half-updated cart.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: Cart::new(),
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { item, respond_to } => {
                    self.handle_add_item(item, respond_to);
                }
                CartRequest::RemoveItem { item_id, respond_to } => {
                    self.handle_remove_item(item_id, respond_to);
                }
                CartRequest::UpdateQuantity {
                    item_id,
                    delta,
                    respond_to,
                } => {
                    self.handle_update_quantity(item_id, delta, respond_to);
                }
                CartRequest::GetLines { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.lines().to_vec()));
                }
                CartRequest::GetTotal { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.total()));
                }
                CartRequest::TakeAll { respond_to } => {
                    self.handle_take_all(respond_to);
                }
                CartRequest::Restore { lines, respond_to } => {
                    info!(line_count = lines.len(), "Restoring cart lines");
                    self.cart.restore(lines);
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::ClearCart { respond_to } => {
                    self.cart.clear();
                    debug!("Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(item_id = %item.id, item_name = %item.name), skip(self, item, respond_to))]
    fn handle_add_item(&mut self, item: MenuItem, respond_to: ServiceResponse<u32, CartError>) {
        debug!("Processing add_item request");
        let quantity = self.cart.add(item);
        info!(quantity, "Item added to cart");
        let _ = respond_to.send(Ok(quantity));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_item(
        &mut self,
        item_id: String,
        respond_to: ServiceResponse<Option<CartItem>, CartError>,
    ) {
        debug!("Processing remove_item request");
        let removed = self.cart.remove(&item_id);
        match &removed {
            Some(line) => info!(quantity = line.quantity, "Line removed"),
            None => debug!("Line not in cart"),
        }
        let _ = respond_to.send(Ok(removed));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_update_quantity(
        &mut self,
        item_id: String,
        delta: i64,
        respond_to: ServiceResponse<u32, CartError>,
    ) {
        debug!("Processing update_quantity request");
        let Some(quantity) = self.cart.update_quantity(&item_id, delta) else {
            send_error!(respond_to, CartError::NotInCart(item_id));
        };
        info!(quantity, "Quantity updated");
        let _ = respond_to.send(Ok(quantity));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_take_all(&mut self, respond_to: ServiceResponse<Vec<CartItem>, CartError>) {
        let lines = self.cart.take();
        info!(line_count = lines.len(), "Cart handed off for checkout");
        let _ = respond_to.send(Ok(lines));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: format!("Item {id}"),
            description: String::new(),
            price,
            category: "Sides".into(),
            image: String::new(),
            rating: 0.0,
            reviews: Vec::new(),
            is_spicy: false,
            is_veg: false,
        }
    }

    #[tokio::test]
    async fn test_cart_service_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let (service, client) = CartService::new(10);
        let handle = tokio::spawn(service.run());

        client.add_item(item("1", 8.0)).await?;
        assert_eq!(client.add_item(item("1", 8.0)).await?, 2);
        client.add_item(item("2", 4.5)).await?;
        assert_eq!(client.get_total().await?, 20.5);

        assert_eq!(client.update_quantity("1".into(), -2).await?, 2);
        assert_eq!(
            client.update_quantity("9".into(), 1).await,
            Err(CartError::NotInCart("9".into()))
        );

        let lines = client.take_all().await?;
        assert_eq!(lines.len(), 2);
        assert!(client.get_lines().await?.is_empty());

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_huge_delta_keeps_service_alive() -> Result<(), Box<dyn std::error::Error>> {
        let (service, client) = CartService::new(10);
        let handle = tokio::spawn(service.run());

        client.add_item(item("1", 2.0)).await?;
        assert_eq!(client.update_quantity("1".into(), i64::MAX).await?, 1);
        assert_eq!(client.update_quantity("1".into(), 10_000_000_000).await?, 1);
        assert_eq!(client.add_item(item("1", 2.0)).await?, 2);
        assert_eq!(client.get_lines().await?.len(), 1);

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }
}
