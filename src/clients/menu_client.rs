use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::seed::ALL_CATEGORIES;
use crate::domain::{MenuItem, MenuItemCreate, MenuItemPatch, ReviewDraft};
use crate::menu_actor::{MenuAction, MenuActionResult, MenuError};

/// Client for interacting with the menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl_client_methods!(MenuClient, MenuItem, MenuError, menu_item);

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(fields(item_name = %item.name), skip(self, item))]
    pub async fn create_item(&self, item: MenuItemCreate) -> Result<String, MenuError> {
        debug!("Sending request");
        Ok(self.inner.create(item).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_item(&self, id: String, patch: MenuItemPatch) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Returns the item's recomputed rating.
    #[instrument(fields(rating = review.rating), skip(self, review))]
    pub async fn add_review(&self, id: String, review: ReviewDraft) -> Result<f64, MenuError> {
        debug!("Sending request");
        match self.inner.perform_action(id, MenuAction::AddReview(review)).await? {
            MenuActionResult::AddReview { review_id, rating } => {
                info!(review_id = %review_id, rating, "Review stored");
                Ok(rating)
            }
        }
    }

    /// Items in `category` (or any category for `All`) whose name contains `query`.
    #[instrument(skip(self))]
    pub async fn browse(&self, category: &str, query: &str) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.list_menu_items().await?;
        let matches: Vec<MenuItem> = items
            .into_iter()
            .filter(|item| category == ALL_CATEGORIES || item.category == category)
            .filter(|item| item.matches_query(query))
            .collect();
        debug!(match_count = matches.len(), "Browse complete");
        Ok(matches)
    }

    /// Moves every item filed under `old_name` to `new_name`. Returns how many moved.
    #[instrument(skip(self))]
    pub async fn recategorize(&self, old_name: &str, new_name: &str) -> Result<usize, MenuError> {
        let affected: Vec<String> = self
            .list_menu_items()
            .await?
            .into_iter()
            .filter(|item| item.category == old_name)
            .map(|item| item.id)
            .collect();

        for id in &affected {
            self.update_item(id.clone(), MenuItemPatch::category(new_name)).await?;
        }
        info!(moved = affected.len(), "Items recategorized");
        Ok(affected.len())
    }

    #[instrument(skip(self))]
    pub async fn count_in_category(&self, category: &str) -> Result<usize, MenuError> {
        let items = self.list_menu_items().await?;
        Ok(items.iter().filter(|item| item.category == category).count())
    }
}
