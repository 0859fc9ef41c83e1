use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceActor;
use crate::actors::{CartService, CategoryService, SessionService};
use crate::clients::{CartClient, CategoryClient, MenuClient, OrderClient, SessionClient, ShoppingClient};
use crate::concierge::{Concierge, GeminiModel, GenerativeModel};
use crate::domain::seed::{starter_menu, CATEGORIES};
use crate::domain::{MenuItem, Order};
use crate::error::CatalogError;

use super::config::AppConfig;
use super::error::StorefrontError;

fn counter_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{prefix}{}", counter.fetch_add(1, Ordering::SeqCst))
}

/// The running app: every actor spawned, wired together and seeded.
///
/// Clients are cheap handles; clone them freely. Call [`Storefront::shutdown`] to stop
/// the services and wait for every actor task.
pub struct Storefront {
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    pub category_client: CategoryClient,
    pub session_client: SessionClient,
    pub shopping_client: ShoppingClient,
    config: AppConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    #[instrument(name = "storefront_startup", skip(config))]
    pub async fn new(config: AppConfig) -> Result<Self, StorefrontError> {
        let buffer = config.actor_buffer;

        // 1. Session-scoped services
        let (session_service, session_client) = SessionService::new(buffer);
        let session_handle = tokio::spawn(session_service.run());

        let (cart_service, cart_client) = CartService::new(buffer);
        let cart_handle = tokio::spawn(cart_service.run());

        let categories = CATEGORIES.iter().map(|c| c.to_string()).collect();
        let (category_service, category_client) = CategoryService::new(buffer, categories);
        let category_handle = tokio::spawn(category_service.run());

        // 2. Menu
        let (menu_actor, menu_resource_client) = ResourceActor::<MenuItem>::new(buffer, counter_ids("item_"));
        let menu_client = MenuClient::new(menu_resource_client);
        let menu_handle = tokio::spawn(menu_actor.run());

        // 3. Orders
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, counter_ids("ORD-"));
        let order_client = OrderClient::new(
            order_resource_client,
            session_client.clone(),
            cart_client.clone(),
            config.auto_confirm_delay,
        );
        let order_handle = tokio::spawn(order_actor.run());

        let shopping_client = ShoppingClient::new(session_client.clone(), cart_client.clone(), menu_client.clone());

        let storefront = Self {
            menu_client,
            order_client,
            cart_client,
            category_client,
            session_client,
            shopping_client,
            config,
            handles: vec![
                session_handle,
                cart_handle,
                category_handle,
                menu_handle,
                order_handle,
            ],
        };
        storefront.seed_menu().await?;
        info!("Storefront ready");
        Ok(storefront)
    }

    async fn seed_menu(&self) -> Result<(), StorefrontError> {
        let seeds = starter_menu();
        let count = seeds.len();
        for seed in seeds {
            let id = self.menu_client.create_item(seed.item).await?;
            for review in seed.reviews {
                self.menu_client.add_review(id.clone(), review).await?;
            }
        }
        info!(item_count = count, "Menu seeded");
        Ok(())
    }

    /// Signs out and drops everything tied to the session: cart and order history.
    /// Favorites and search history stay.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StorefrontError> {
        self.session_client.logout().await?;
        self.cart_client.clear_cart().await?;
        let cleared = self.order_client.clear_history().await?;
        info!(cleared_orders = cleared, "Signed out");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_category(&self, name: String) -> Result<bool, CatalogError> {
        Ok(self.category_client.add_category(name).await?)
    }

    /// Renames the category and re-files every item that used it. Returns how many
    /// items moved.
    #[instrument(skip(self))]
    pub async fn rename_category(&self, old_name: String, new_name: String) -> Result<usize, CatalogError> {
        self.category_client
            .rename_category(old_name.clone(), new_name.clone())
            .await?;
        let new_name = new_name.trim();
        Ok(self.menu_client.recategorize(&old_name, new_name).await?)
    }

    /// Removes the category from the filter list only. Returns how many items still
    /// carry the old category string.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, name: String) -> Result<usize, CatalogError> {
        self.category_client.remove_category(name.clone()).await?;
        let still_using = self.menu_client.count_in_category(&name).await?;
        if still_using > 0 {
            warn!(still_using, "Deleted category is still used by menu items");
        }
        Ok(still_using)
    }

    /// A concierge backed by Gemini, or by canned replies when no API key is set.
    pub async fn concierge(&self) -> Result<Concierge<GeminiModel>, StorefrontError> {
        let model = self.config.api_key.as_ref().map(|key| {
            GeminiModel::new(key.clone(), self.config.chat_model.clone(), self.config.image_model.clone())
        });
        self.concierge_with(model).await
    }

    /// A concierge over any model, with a session already started on the live menu.
    pub async fn concierge_with<M: GenerativeModel>(&self, model: Option<M>) -> Result<Concierge<M>, StorefrontError> {
        let menu = self.menu_client.list_menu_items().await?;
        let mut concierge = Concierge::new(model, self.config.language);
        concierge.start_session(&menu);
        Ok(concierge)
    }

    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down storefront...");

        // Hand-written services stop on an explicit message.
        self.session_client.shutdown().await?;
        self.cart_client.shutdown().await?;
        self.category_client.shutdown().await?;

        // Resource actors stop once every client handle is gone.
        drop(self.shopping_client);
        drop(self.order_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StorefrontError::TaskFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
