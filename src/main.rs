mod actor_framework;
mod actors;
mod app_system;
mod clients;
mod concierge;
mod domain;
mod error;
mod menu_actor;
mod messages;
mod order_actor;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, AppConfig, Storefront, StorefrontError};
use crate::domain::seed::ALL_CATEGORIES;
use crate::domain::OrderFilter;

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
    setup_tracing();

    let config = AppConfig::load()?;
    let delay = config.auto_confirm_delay;
    info!(language = %config.language, "Starting street eats storefront");

    let storefront = Storefront::new(config).await?;

    let span = tracing::info_span!("sign_in");
    let user = async {
        info!("Signing in demo shopper");
        storefront.session_client.login("demo@streeteats.ph".to_string()).await
    }
    .instrument(span)
    .await?;
    info!(user_name = %user.name, "Signed in");

    // Fill the cart from the noodle stall plus whatever matches "taco"
    let noodles = storefront.menu_client.browse("Noodles", "").await?;
    let tacos = storefront.menu_client.browse(ALL_CATEGORIES, "taco").await?;
    for item in noodles.iter().chain(tacos.iter().take(1)) {
        storefront.shopping_client.add_to_cart(item.id.clone()).await?;
    }
    if let Some(first) = noodles.first() {
        storefront.shopping_client.add_to_cart(first.id.clone()).await?;
    }
    let total = storefront.cart_client.get_total().await?;
    info!(total, "Cart ready");

    let span = tracing::info_span!("checkout");
    let order_result = async {
        info!("Placing order");
        storefront.order_client.place_order().await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order_id) => {
            info!(order_id = %order_id, "Order placed");
            tokio::time::sleep(delay + std::time::Duration::from_millis(100)).await;
            if let Some(order) = storefront.order_client.get_order(order_id.clone()).await? {
                info!(status = %order.status, step = ?order.status.tracker_step(), "Order status");

                // Admin walks the order through the kitchen to the door
                let mut status = order.status;
                while let Some(next) = status.next() {
                    status = storefront.order_client.update_status(order_id.clone(), next).await?.current;
                }
            }
            let delivered = storefront.order_client.get_order(order_id).await?;
            info!(can_review = delivered.as_ref().is_some_and(|o| o.can_review()), "Order delivered");
        }
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    if let Some(item) = noodles.first() {
        let rating = storefront
            .shopping_client
            .submit_review(item.id.clone(), 5, "Sulit! Spicy and filling.".to_string())
            .await?;
        info!(item_name = %item.name, rating, "Review submitted");
    }

    let mut concierge = storefront.concierge().await?;
    let reply = concierge.send_message("What's good for someone who loves spicy food?").await;
    info!(reply = %reply, "Concierge replied");

    let active = storefront.order_client.recent_orders(OrderFilter::Active).await?;
    let stats = storefront.order_client.stats().await?;
    info!(active = active.len(), revenue = stats.revenue, "Dashboard");

    storefront.logout().await?;
    storefront.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
