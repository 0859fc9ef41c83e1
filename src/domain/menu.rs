use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    /// Mean of all review ratings, one decimal place. Zero when unreviewed.
    pub rating: f64,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub is_spicy: bool,
    pub is_veg: bool,
}

/// A customer's rating of a menu item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub is_spicy: bool,
    pub is_veg: bool,
}

/// Payload for updating an existing menu item. Reviews and rating are never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_spicy: Option<bool>,
    pub is_veg: Option<bool>,
}

impl MenuItemPatch {
    /// Patch that only moves the item to another category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// What a shopper submits; the menu actor assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

impl MenuItem {
    /// Mean of `reviews` rounded to one decimal place.
    pub fn average_rating(reviews: &[Review]) -> f64 {
        if reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(sum) / reviews.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Case-insensitive name match; an empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.trim().to_lowercase())
    }

    /// Menu line used in the concierge prompt.
    pub fn prompt_line(&self) -> String {
        format!(
            "- {} (₱{}): {} [{}, {}]",
            self.name,
            self.price,
            self.description,
            if self.is_spicy { "Spicy" } else { "Non-Spicy" },
            if self.is_veg { "Veg" } else { "Non-Veg" },
        )
    }
}
