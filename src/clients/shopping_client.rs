use tracing::{error, info, instrument};

use crate::clients::{CartClient, MenuClient, SessionClient};
use crate::domain::{MenuItem, ReviewDraft};
use crate::error::ShoppingError;
use crate::menu_actor::MenuError;

/// Shopper actions that need a signed-in session before touching the menu or the cart.
#[derive(Clone)]
pub struct ShoppingClient {
    session_client: SessionClient,
    cart_client: CartClient,
    menu_client: MenuClient,
}

impl ShoppingClient {
    pub fn new(session_client: SessionClient, cart_client: CartClient, menu_client: MenuClient) -> Self {
        Self {
            session_client,
            cart_client,
            menu_client,
        }
    }

    /// Adds one unit of the item. Returns the line's quantity afterwards.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, item_id: String) -> Result<u32, ShoppingError> {
        self.session_client.require_user().await?;

        let item = match self.menu_client.get_menu_item(item_id.clone()).await? {
            Some(item) => item,
            None => {
                error!("Menu item not found");
                return Err(MenuError::NotFound(item_id).into());
            }
        };

        let quantity = self.cart_client.add_item(item).await?;
        info!(quantity, "Added to cart");
        Ok(quantity)
    }

    /// Returns whether the item is now a favorite.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, item_id: String) -> Result<bool, ShoppingError> {
        if self.menu_client.get_menu_item(item_id.clone()).await?.is_none() {
            return Err(MenuError::NotFound(item_id).into());
        }
        Ok(self.session_client.toggle_favorite(item_id).await?)
    }

    /// Favorite items still on the menu, in menu order.
    #[instrument(skip(self))]
    pub async fn favorite_items(&self) -> Result<Vec<MenuItem>, ShoppingError> {
        let favorites = self.session_client.favorites().await?;
        let items = self.menu_client.list_menu_items().await?;
        Ok(items
            .into_iter()
            .filter(|item| favorites.contains(&item.id))
            .collect())
    }

    /// Reviews are signed with the profile name. Returns the item's new rating.
    #[instrument(skip(self, comment))]
    pub async fn submit_review(&self, item_id: String, rating: u8, comment: String) -> Result<f64, ShoppingError> {
        let user = self.session_client.require_user().await?;
        let draft = ReviewDraft {
            user_id: user.name.clone(),
            user_name: user.name,
            rating,
            comment,
        };
        Ok(self.menu_client.add_review(item_id, draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{CartService, SessionService};
    use crate::error::SessionError;
    use crate::mock_framework::{create_mock_client, expect_get};

    fn momo() -> MenuItem {
        MenuItem {
            id: "item_5".into(),
            name: "Chicken Momos".into(),
            description: String::new(),
            price: 7.0,
            category: "Dumplings".into(),
            image: String::new(),
            rating: 0.0,
            reviews: Vec::new(),
            is_spicy: false,
            is_veg: false,
        }
    }

    fn client() -> (ShoppingClient, SessionClient, CartClient, tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<MenuItem>>) {
        let (session_service, session_client) = SessionService::new(10);
        tokio::spawn(session_service.run());
        let (cart_service, cart_client) = CartService::new(10);
        tokio::spawn(cart_service.run());
        let (inner, receiver) = create_mock_client::<MenuItem>(10);
        let client = ShoppingClient::new(session_client.clone(), cart_client.clone(), MenuClient::new(inner));
        (client, session_client, cart_client, receiver)
    }

    #[tokio::test]
    async fn test_add_to_cart_looks_up_item() {
        let (client, session_client, cart_client, mut receiver) = client();
        session_client.login_with_google().await.unwrap();

        let task = tokio::spawn(async move { client.add_to_cart("item_5".into()).await });
        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get");
        assert_eq!(id, "item_5");
        responder.send(Ok(Some(momo()))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(1));
        assert_eq!(cart_client.get_total().await.unwrap(), 7.0);
    }

    #[tokio::test]
    async fn test_unknown_item_and_missing_session() {
        let (client, session_client, cart_client, mut receiver) = client();
        assert_eq!(
            client.add_to_cart("item_5".into()).await,
            Err(ShoppingError::Session(SessionError::NotAuthenticated))
        );

        session_client.login_with_google().await.unwrap();
        let task = tokio::spawn(async move { client.add_to_cart("item_99".into()).await });
        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ShoppingError::Menu(MenuError::NotFound("item_99".into())))
        );
        assert!(cart_client.get_lines().await.unwrap().is_empty());
    }
}
