use tokio::sync::oneshot;

use crate::domain::{CartItem, MenuItem, UserProfile};
use crate::error::{CartError, CategoryError, SessionError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes parameters
/// and a oneshot channel for responses.

#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        item: MenuItem,
        respond_to: ServiceResponse<u32, CartError>,
    },
    RemoveItem {
        item_id: String,
        respond_to: ServiceResponse<Option<CartItem>, CartError>,
    },
    UpdateQuantity {
        item_id: String,
        delta: i64,
        respond_to: ServiceResponse<u32, CartError>,
    },
    GetLines {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    GetTotal {
        respond_to: ServiceResponse<f64, CartError>,
    },
    /// Empties the cart and returns what it held, in one step.
    TakeAll {
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    Restore {
        lines: Vec<CartItem>,
        respond_to: ServiceResponse<(), CartError>,
    },
    ClearCart {
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CategoryRequest {
    ListCategories {
        respond_to: ServiceResponse<Vec<String>, CategoryError>,
    },
    AddCategory {
        name: String,
        respond_to: ServiceResponse<bool, CategoryError>,
    },
    RenameCategory {
        old_name: String,
        new_name: String,
        respond_to: ServiceResponse<(), CategoryError>,
    },
    RemoveCategory {
        name: String,
        respond_to: ServiceResponse<(), CategoryError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum SessionRequest {
    Login {
        email: String,
        respond_to: ServiceResponse<UserProfile, SessionError>,
    },
    Register {
        profile: UserProfile,
        respond_to: ServiceResponse<UserProfile, SessionError>,
    },
    LoginWithGoogle {
        respond_to: ServiceResponse<UserProfile, SessionError>,
    },
    Logout {
        respond_to: ServiceResponse<(), SessionError>,
    },
    CurrentUser {
        respond_to: ServiceResponse<Option<UserProfile>, SessionError>,
    },
    UpdateAddress {
        address: String,
        respond_to: ServiceResponse<UserProfile, SessionError>,
    },
    SetAdmin {
        enabled: bool,
        respond_to: ServiceResponse<(), SessionError>,
    },
    IsAdmin {
        respond_to: ServiceResponse<bool, SessionError>,
    },
    ToggleFavorite {
        item_id: String,
        respond_to: ServiceResponse<bool, SessionError>,
    },
    Favorites {
        respond_to: ServiceResponse<Vec<String>, SessionError>,
    },
    RecordSearch {
        term: String,
        respond_to: ServiceResponse<Vec<String>, SessionError>,
    },
    SearchHistory {
        respond_to: ServiceResponse<Vec<String>, SessionError>,
    },
    ClearSearchHistory {
        respond_to: ServiceResponse<(), SessionError>,
    },
    Shutdown,
}
