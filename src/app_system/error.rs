use thiserror::Error;

use crate::error::{CartError, CatalogError, CategoryError, SessionError, ShoppingError};
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;

use super::config::ConfigError;

/// Anything that can go wrong while booting, driving or stopping the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Shopping(#[from] ShoppingError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
