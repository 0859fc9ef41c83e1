use tokio::sync::mpsc;

use crate::domain::UserProfile;
use crate::error::SessionError;
use crate::messages::SessionRequest;

/// Client for the SessionService.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    /// The signed-in profile, or `NotAuthenticated`. Used to guard protected actions.
    pub async fn require_user(&self) -> Result<UserProfile, SessionError> {
        self.current_user().await?.ok_or(SessionError::NotAuthenticated)
    }
}

client_method!(SessionClient => fn login(email: String) -> UserProfile as SessionRequest::Login, Error = SessionError);
client_method!(SessionClient => fn register(profile: UserProfile) -> UserProfile as SessionRequest::Register, Error = SessionError);
client_method!(SessionClient => fn login_with_google() -> UserProfile as SessionRequest::LoginWithGoogle, Error = SessionError);
client_method!(SessionClient => fn logout() -> () as SessionRequest::Logout, Error = SessionError);
client_method!(SessionClient => fn current_user() -> Option<UserProfile> as SessionRequest::CurrentUser, Error = SessionError);
client_method!(SessionClient => fn update_address(address: String) -> UserProfile as SessionRequest::UpdateAddress, Error = SessionError);
client_method!(SessionClient => fn set_admin(enabled: bool) -> () as SessionRequest::SetAdmin, Error = SessionError);
client_method!(SessionClient => fn is_admin() -> bool as SessionRequest::IsAdmin, Error = SessionError);
client_method!(SessionClient => fn toggle_favorite(item_id: String) -> bool as SessionRequest::ToggleFavorite, Error = SessionError);
client_method!(SessionClient => fn favorites() -> Vec<String> as SessionRequest::Favorites, Error = SessionError);
client_method!(SessionClient => fn record_search(term: String) -> Vec<String> as SessionRequest::RecordSearch, Error = SessionError);
client_method!(SessionClient => fn search_history() -> Vec<String> as SessionRequest::SearchHistory, Error = SessionError);
client_method!(SessionClient => fn clear_search_history() -> () as SessionRequest::ClearSearchHistory, Error = SessionError);
impl_shutdown!(SessionClient, SessionRequest, SessionError);
