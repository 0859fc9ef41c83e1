//! Order-specific domain logic: snapshot creation and the status lifecycle.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
