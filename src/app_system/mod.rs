//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod storefront;
pub mod telemetry;

pub use config::*;
pub use error::*;
pub use storefront::*;
pub use telemetry::*;
