use thiserror::Error;

use crate::menu_actor::MenuError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Item not in cart: {0}")]
    NotInCart(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Category already exists: {0}")]
    AlreadyExists(String),
    #[error("Category validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Sign in required")]
    NotAuthenticated,
    #[error("Session validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failures of shopper workflows that span several actors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShoppingError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Failures of admin catalog workflows (categories plus the items that use them).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Category(#[from] CategoryError),
}
