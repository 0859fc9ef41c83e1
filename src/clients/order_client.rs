use std::time::Duration;

use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::{CartClient, SessionClient};
use crate::domain::{Order, OrderCreate, OrderFilter, OrderStats, OrderStatus};
use crate::error::{CartError, SessionError};
use crate::order_actor::{OrderAction, OrderError, StatusChange};

impl From<SessionError> for OrderError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotAuthenticated => OrderError::NotAuthenticated,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(err: CartError) -> Self {
        OrderError::ActorCommunicationError(err.to_string())
    }
}

/// Client for interacting with the Order actor.
///
/// Checkout is orchestrated here: the session is checked, the cart is taken in a single
/// message, the order is created and the auto-confirm timer is armed.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    session_client: SessionClient,
    cart_client: CartClient,
    auto_confirm_delay: Duration,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        session_client: SessionClient,
        cart_client: CartClient,
        auto_confirm_delay: Duration,
    ) -> Self {
        Self {
            inner,
            session_client,
            cart_client,
            auto_confirm_delay,
        }
    }

    /// Turns the current cart into a Pending order and returns its id.
    ///
    /// # Errors
    /// `NotAuthenticated` without a session, `EmptyCart` when there is nothing to order.
    /// If the order actor rejects the snapshot the lines go back into the cart.
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> Result<String, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate session
        let user = self.session_client.require_user().await.map_err(|e| {
            error!(error = %e, "Checkout without a session");
            OrderError::from(e)
        })?;
        info!(user_name = %user.name, "Session validation successful");

        // Step 2: Take the cart
        let lines = self.cart_client.take_all().await?;
        if lines.is_empty() {
            error!("Cart is empty");
            return Err(OrderError::EmptyCart);
        }

        // Step 3: Create order
        let id = match self.inner.create(OrderCreate { items: lines.clone() }).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order creation failed, restoring cart");
                if let Err(restore_err) = self.cart_client.restore(lines).await {
                    error!(error = %restore_err, "Cart restore failed");
                }
                return Err(e.into());
            }
        };
        info!(order_id = %id, "Order created successfully");

        // Step 4: Simulate the kitchen accepting the order
        self.schedule_auto_confirm(id.clone());
        Ok(id)
    }

    /// Fire-and-forget: no retry, and nothing cancels it.
    fn schedule_auto_confirm(&self, id: String) {
        let inner = self.inner.clone();
        let delay = self.auto_confirm_delay;
        let span = tracing::info_span!("auto_confirm", order_id = %id);

        tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                match inner.perform_action(id, OrderAction::ConfirmIfPending).await {
                    Ok(change) if change.changed() => info!("Order auto-confirmed"),
                    Ok(change) => debug!(status = %change.current, "Order already moved on, skipping"),
                    Err(e) => warn!(error = %e, "Auto-confirm failed"),
                }
            }
            .instrument(span),
        );
    }

    /// Admin control. Any status may be set; going backwards is allowed but logged.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<StatusChange, OrderError> {
        debug!("Sending request");
        let change = self
            .inner
            .perform_action(id, OrderAction::SetStatus(status))
            .await?;
        if change.is_regression() {
            warn!(from = %change.previous, to = %change.current, "Order status moved backwards");
        } else {
            info!(from = %change.previous, to = %change.current, "Order status updated");
        }
        Ok(change)
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_orders().await?;
        orders.reverse();
        orders.retain(|order| filter.accepts(order));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<OrderStats, OrderError> {
        let orders = self.list_orders().await?;
        let stats = OrderStats::from_orders(&orders);
        debug!(revenue = stats.revenue, order_count = stats.order_count, "Stats computed");
        Ok(stats)
    }

    /// Adds every line of a past order to the cart. Quantities stack on top of
    /// anything already there: 5 in the cart plus an order of 3 leaves 8.
    #[instrument(skip(self))]
    pub async fn reorder(&self, id: String) -> Result<usize, OrderError> {
        self.session_client.require_user().await?;
        let order = self
            .get_order(id.clone())
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let line_count = order.items.len();
        self.cart_client.restore(order.items).await?;
        info!(line_count, "Order copied into cart");
        Ok(line_count)
    }

    /// Drops every order; used when the shopper signs out.
    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Result<usize, OrderError> {
        debug!("Sending request");
        Ok(self.inner.clear().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{CartService, SessionService};
    use crate::domain::MenuItem;
    use crate::mock_framework::{create_mock_client, expect_create};

    fn taco() -> MenuItem {
        MenuItem {
            id: "item_3".into(),
            name: "Crispy Fish Tacos".into(),
            description: String::new(),
            price: 9.5,
            category: "Tacos".into(),
            image: String::new(),
            rating: 0.0,
            reviews: Vec::new(),
            is_spicy: false,
            is_veg: false,
        }
    }

    fn start_services() -> (SessionClient, CartClient) {
        let (session_service, session_client) = SessionService::new(10);
        tokio::spawn(session_service.run());
        let (cart_service, cart_client) = CartService::new(10);
        tokio::spawn(cart_service.run());
        (session_client, cart_client)
    }

    #[tokio::test]
    async fn test_checkout_requires_session() {
        let (session_client, cart_client) = start_services();
        let (inner, _receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner, session_client, cart_client, Duration::from_secs(2));

        assert_eq!(client.place_order().await, Err(OrderError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_empty_cart_places_nothing() {
        let (session_client, cart_client) = start_services();
        session_client.login_with_google().await.unwrap();
        let (inner, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner, session_client, cart_client, Duration::from_secs(2));

        assert_eq!(client.place_order().await, Err(OrderError::EmptyCart));
        drop(client);
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_create_restores_cart() {
        let (session_client, cart_client) = start_services();
        session_client.login_with_google().await.unwrap();
        cart_client.add_item(taco()).await.unwrap();
        cart_client.add_item(taco()).await.unwrap();

        let (inner, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner, session_client, cart_client.clone(), Duration::from_secs(2));
        let task = tokio::spawn(async move { client.place_order().await });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(params.items.len(), 1);
        assert_eq!(params.items[0].quantity, 2);
        responder
            .send(Err(crate::actor_framework::FrameworkError::ActorDropped))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(OrderError::ActorCommunicationError(_))
        ));
        let lines = cart_client.get_lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }
}
