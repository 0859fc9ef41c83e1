use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during menu and review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item not found: {0}")]
    NotFound(String),
    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(u8),
    #[error("Menu item validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<MenuError>> for MenuError {
    fn from(err: FrameworkError<MenuError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}
