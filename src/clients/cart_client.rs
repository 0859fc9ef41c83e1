use tokio::sync::mpsc;

use crate::domain::{CartItem, MenuItem};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Client for the CartService.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn add_item(item: MenuItem) -> u32 as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn remove_item(item_id: String) -> Option<CartItem> as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn update_quantity(item_id: String, delta: i64) -> u32 as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn get_lines() -> Vec<CartItem> as CartRequest::GetLines, Error = CartError);
client_method!(CartClient => fn get_total() -> f64 as CartRequest::GetTotal, Error = CartError);
client_method!(CartClient => fn take_all() -> Vec<CartItem> as CartRequest::TakeAll, Error = CartError);
client_method!(CartClient => fn restore(lines: Vec<CartItem>) -> () as CartRequest::Restore, Error = CartError);
client_method!(CartClient => fn clear_cart() -> () as CartRequest::ClearCart, Error = CartError);
impl_shutdown!(CartClient, CartRequest, CartError);
