use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::SessionClient;
use crate::domain::UserProfile;
use crate::error::SessionError;
use crate::messages::{ServiceResponse, SessionRequest};

/// Most recent searches kept in the history dropdown.
pub const SEARCH_HISTORY_LIMIT: usize = 5;

/// Mock authentication plus everything scoped to the signed-in shopper:
/// admin mode, favorites and search history.
pub struct SessionService {
    receiver: mpsc::Receiver<SessionRequest>,
    user: Option<UserProfile>,
    is_admin: bool,
    favorites: Vec<String>,
    search_history: VecDeque<String>,
}

impl SessionService {
    pub fn new(buffer_size: usize) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            user: None,
            is_admin: false,
            favorites: Vec::new(),
            search_history: VecDeque::with_capacity(SEARCH_HISTORY_LIMIT),
        };
        (service, SessionClient::new(sender))
    }

    #[instrument(name = "session_service", skip(self))]
    pub async fn run(mut self) {
        info!("SessionService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::Login { email, respond_to } => {
                    self.handle_login(email, respond_to);
                }
                SessionRequest::Register { profile, respond_to } => {
                    self.handle_register(profile, respond_to);
                }
                SessionRequest::LoginWithGoogle { respond_to } => {
                    let profile = UserProfile::google();
                    info!(user_name = %profile.name, "Google sign-in");
                    self.user = Some(profile.clone());
                    let _ = respond_to.send(Ok(profile));
                }
                SessionRequest::Logout { respond_to } => {
                    self.handle_logout(respond_to);
                }
                SessionRequest::CurrentUser { respond_to } => {
                    let _ = respond_to.send(Ok(self.user.clone()));
                }
                SessionRequest::UpdateAddress { address, respond_to } => {
                    self.handle_update_address(address, respond_to);
                }
                SessionRequest::SetAdmin { enabled, respond_to } => {
                    info!(enabled, "Admin mode toggled");
                    self.is_admin = enabled;
                    let _ = respond_to.send(Ok(()));
                }
                SessionRequest::IsAdmin { respond_to } => {
                    let _ = respond_to.send(Ok(self.is_admin));
                }
                SessionRequest::ToggleFavorite { item_id, respond_to } => {
                    self.handle_toggle_favorite(item_id, respond_to);
                }
                SessionRequest::Favorites { respond_to } => {
                    let _ = respond_to.send(Ok(self.favorites.clone()));
                }
                SessionRequest::RecordSearch { term, respond_to } => {
                    self.handle_record_search(term, respond_to);
                }
                SessionRequest::SearchHistory { respond_to } => {
                    let _ = respond_to.send(Ok(self.search_history.iter().cloned().collect()));
                }
                SessionRequest::ClearSearchHistory { respond_to } => {
                    self.search_history.clear();
                    let _ = respond_to.send(Ok(()));
                }
                SessionRequest::Shutdown => {
                    info!("SessionService shutting down");
                    break;
                }
            }
        }

        info!("SessionService stopped");
    }

    /// Any non-empty email signs in the demo profile.
    #[instrument(skip(self, email, respond_to))]
    fn handle_login(&mut self, email: String, respond_to: ServiceResponse<UserProfile, SessionError>) {
        debug!("Processing login request");
        let email = email.trim();
        if email.is_empty() {
            error!("Validation failed: empty email");
            send_error!(respond_to, SessionError::ValidationError("Email required".to_string()));
        }
        let profile = UserProfile::demo(email);
        info!(user_name = %profile.name, "User signed in");
        self.user = Some(profile.clone());
        let _ = respond_to.send(Ok(profile));
    }

    #[instrument(fields(user_name = %profile.name), skip(self, profile, respond_to))]
    fn handle_register(
        &mut self,
        profile: UserProfile,
        respond_to: ServiceResponse<UserProfile, SessionError>,
    ) {
        debug!("Processing register request");
        if profile.name.trim().is_empty() || profile.address.trim().is_empty() {
            error!("Validation failed: name and address required");
            send_error!(
                respond_to,
                SessionError::ValidationError("Name and address required".to_string())
            );
        }
        info!("User registered");
        self.user = Some(profile.clone());
        let _ = respond_to.send(Ok(profile));
    }

    /// Ends the session and drops admin mode. Favorites and search history survive, as they
    /// belong to the device rather than the account.
    #[instrument(skip(self, respond_to))]
    fn handle_logout(&mut self, respond_to: ServiceResponse<(), SessionError>) {
        match self.user.take() {
            Some(user) => info!(user_name = %user.name, "User signed out"),
            None => debug!("Logout without a session"),
        }
        self.is_admin = false;
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, address, respond_to))]
    fn handle_update_address(
        &mut self,
        address: String,
        respond_to: ServiceResponse<UserProfile, SessionError>,
    ) {
        debug!("Processing update_address request");
        let Some(user) = self.user.as_mut() else {
            send_error!(respond_to, SessionError::NotAuthenticated);
        };
        let address = address.trim();
        if address.is_empty() {
            send_error!(respond_to, SessionError::ValidationError("Address required".to_string()));
        }
        user.address = address.to_string();
        info!("Address updated");
        let _ = respond_to.send(Ok(user.clone()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_toggle_favorite(&mut self, item_id: String, respond_to: ServiceResponse<bool, SessionError>) {
        if self.user.is_none() {
            send_error!(respond_to, SessionError::NotAuthenticated);
        }
        let now_favorite = match self.favorites.iter().position(|id| *id == item_id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(item_id);
                true
            }
        };
        info!(now_favorite, "Favorite toggled");
        let _ = respond_to.send(Ok(now_favorite));
    }

    /// Moves the trimmed term to the front, dropping older duplicates and anything past the limit.
    #[instrument(skip(self, respond_to))]
    fn handle_record_search(&mut self, term: String, respond_to: ServiceResponse<Vec<String>, SessionError>) {
        let term = term.trim();
        if !term.is_empty() {
            self.search_history.retain(|existing| existing != term);
            self.search_history.push_front(term.to_string());
            self.search_history.truncate(SEARCH_HISTORY_LIMIT);
            debug!(history_len = self.search_history.len(), "Search recorded");
        }
        let _ = respond_to.send(Ok(self.search_history.iter().cloned().collect()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> SessionClient {
        let (service, client) = SessionService::new(10);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_login_variants() {
        let client = start();

        assert!(matches!(
            client.login("   ".into()).await,
            Err(SessionError::ValidationError(_))
        ));
        let user = client.login("ana@example.com".into()).await.unwrap();
        assert_eq!(user, UserProfile::demo("ana@example.com"));

        let incomplete = UserProfile::new("Ben", "ben@example.com", "", "");
        assert!(client.register(incomplete).await.is_err());
        assert_eq!(client.current_user().await.unwrap(), Some(user));

        let google = client.login_with_google().await.unwrap();
        assert_eq!(google.name, "Google User");
    }

    #[tokio::test]
    async fn test_logout_drops_admin_mode() {
        let client = start();
        client.login_with_google().await.unwrap();
        client.set_admin(true).await.unwrap();
        client.logout().await.unwrap();

        assert_eq!(client.current_user().await.unwrap(), None);
        assert!(!client.is_admin().await.unwrap());
        assert_eq!(
            client.update_address("1 Main St".into()).await,
            Err(SessionError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn test_favorites_require_sign_in_and_toggle() {
        let client = start();
        assert_eq!(
            client.toggle_favorite("item_1".into()).await,
            Err(SessionError::NotAuthenticated)
        );

        client.login("a@b.c".into()).await.unwrap();
        assert!(client.toggle_favorite("item_1".into()).await.unwrap());
        assert!(client.toggle_favorite("item_2".into()).await.unwrap());
        assert!(!client.toggle_favorite("item_1".into()).await.unwrap());
        assert_eq!(client.favorites().await.unwrap(), vec!["item_2"]);
    }

    #[tokio::test]
    async fn test_search_history_keeps_five_most_recent_unique_terms() {
        let client = start();
        for term in ["sisig", "taho", "isaw", "turon", "balut", "kwek"] {
            client.record_search(term.into()).await.unwrap();
        }
        client.record_search("  ".into()).await.unwrap();
        let history = client.record_search(" isaw ".into()).await.unwrap();
        assert_eq!(history, vec!["isaw", "kwek", "balut", "turon", "taho"]);

        client.clear_search_history().await.unwrap();
        assert!(client.search_history().await.unwrap().is_empty());
    }
}
