//! Cloneable handles for every actor, plus the clients that orchestrate several of them.

#[macro_use]
mod macros;

pub mod cart_client;
pub mod category_client;
pub mod menu_client;
pub mod order_client;
pub mod session_client;
pub mod shopping_client;

pub use cart_client::CartClient;
pub use category_client::CategoryClient;
pub use menu_client::MenuClient;
pub use order_client::OrderClient;
pub use session_client::SessionClient;
pub use shopping_client::ShoppingClient;
