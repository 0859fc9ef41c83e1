use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    /// Domain error returned by the hooks below.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures of the actor plumbing, wrapping the entity's own error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameworkError<E> {
    #[error("{0}")]
    Entity(E),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Clear {
        respond_to: Response<usize, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns every entity of one type. Listing preserves insertion order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self
                        .insertion_order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Clear { respond_to } => {
                    let removed = self.store.len();
                    self.store.clear();
                    self.insertion_order.clear();
                    debug!(removed, "Store cleared");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        self.insertion_order.push(id.clone());
        debug!(id = %id, "Entity created");
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(patch).map_err(FrameworkError::Entity)?;
        Ok(item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        self.insertion_order.retain(|existing| existing != &id);
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would require `T: Clone` on the id/params types too.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<usize, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: String,
        name: String,
        sold_out: bool,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
    }

    #[derive(Debug)]
    struct DishPatch {
        name: Option<String>,
    }

    #[derive(Debug)]
    enum DishAction {
        MarkSoldOut,
    }

    #[derive(Debug, Clone, PartialEq, Error)]
    enum DishError {
        #[error("name required")]
        EmptyName,
        #[error("dish is locked")]
        Locked,
    }

    impl Entity for Dish {
        type Id = String;
        type CreateParams = DishCreate;
        type Patch = DishPatch;
        type Action = DishAction;
        type ActionResult = bool;
        type Error = DishError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: DishCreate) -> Result<Self, DishError> {
            if params.name.is_empty() {
                return Err(DishError::EmptyName);
            }
            Ok(Self { id, name: params.name, sold_out: false })
        }

        fn on_update(&mut self, patch: DishPatch) -> Result<(), DishError> {
            if let Some(name) = patch.name {
                self.name = name;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), DishError> {
            if self.name == "signature" {
                return Err(DishError::Locked);
            }
            Ok(())
        }

        fn handle_action(&mut self, action: DishAction) -> Result<bool, DishError> {
            match action {
                DishAction::MarkSoldOut => {
                    let changed = !self.sold_out;
                    self.sold_out = true;
                    Ok(changed)
                }
            }
        }
    }

    fn spawn_dish_actor() -> ResourceClient<Dish> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("dish_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    fn create(name: &str) -> DishCreate {
        DishCreate { name: name.to_string() }
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_dish_actor();

        let id = client.create(create("Sisig")).await.unwrap();
        assert_eq!(id, "dish_1");

        assert!(client.perform_action(id.clone(), DishAction::MarkSoldOut).await.unwrap());
        assert!(!client.perform_action(id.clone(), DishAction::MarkSoldOut).await.unwrap());

        let dish = client.get(id).await.unwrap().unwrap();
        assert!(dish.sold_out);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order_after_delete() {
        let client = spawn_dish_actor();
        let first = client.create(create("Isaw")).await.unwrap();
        client.create(create("Taho")).await.unwrap();
        client.create(create("Turon")).await.unwrap();

        client.delete(first).await.unwrap();

        let names: Vec<String> = client.list().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Taho", "Turon"]);
    }

    #[tokio::test]
    async fn test_hook_errors_surface_as_entity_errors() {
        let client = spawn_dish_actor();

        let err = client.create(create("")).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(DishError::EmptyName));

        let id = client.create(create("signature")).await.unwrap();
        let err = client.delete(id.clone()).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(DishError::Locked));
        assert_eq!(err.to_string(), "dish is locked");
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[test]
    fn framework_errors_display_and_box() {
        let boxed: Box<dyn std::error::Error + Send + Sync> =
            Box::new(FrameworkError::<DishError>::NotFound("dish_9".into()));
        assert_eq!(boxed.to_string(), "Item not found: dish_9");
        assert_eq!(FrameworkError::<DishError>::ActorClosed.to_string(), "Actor closed");
        assert_eq!(FrameworkError::<DishError>::ActorDropped.to_string(), "Actor dropped");
    }

    #[tokio::test]
    async fn test_missing_ids_and_clear() {
        let client = spawn_dish_actor();

        let patch = DishPatch { name: Some("x".into()) };
        let err = client.update("nope".into(), patch).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("nope".into()));

        client.create(create("Kwek-kwek")).await.unwrap();
        client.create(create("Fishball")).await.unwrap();
        assert_eq!(client.clear().await.unwrap(), 2);
        assert!(client.list().await.unwrap().is_empty());
    }
}
