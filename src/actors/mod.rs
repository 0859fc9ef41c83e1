//! Hand-written services for session-scoped state that does not fit the generic
//! `ResourceActor` shape: the cart, the category list and the signed-in session.

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

pub mod cart_service;
pub mod category_service;
pub mod session_service;

pub use cart_service::CartService;
pub use category_service::CategoryService;
pub use session_service::SessionService;
