use chrono::Utc;

use super::actions::{MenuAction, MenuActionResult};
use super::error::MenuError;
use crate::actor_framework::Entity;
use crate::domain::{MenuItem, MenuItemCreate, MenuItemPatch, Review, ReviewDraft, MAX_RATING, MIN_RATING};

fn validate_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::ValidationError("Name required".to_string()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), MenuError> {
    if !price.is_finite() || price < 0.0 {
        return Err(MenuError::ValidationError(format!("Invalid price: {}", price)));
    }
    Ok(())
}

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = MenuItemCreate;
    type Patch = MenuItemPatch;
    type Action = MenuAction;
    type ActionResult = MenuActionResult;
    type Error = MenuError;

    fn id(&self) -> &String {
        &self.id
    }

    /// New items start unreviewed with a zero rating.
    fn from_create_params(id: String, params: MenuItemCreate) -> Result<Self, MenuError> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            category: params.category,
            image: params.image,
            rating: 0.0,
            reviews: Vec::new(),
            is_spicy: params.is_spicy,
            is_veg: params.is_veg,
        })
    }

    /// Applies the admin edit form. Validation runs before any field changes.
    fn on_update(&mut self, patch: MenuItemPatch) -> Result<(), MenuError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(is_spicy) = patch.is_spicy {
            self.is_spicy = is_spicy;
        }
        if let Some(is_veg) = patch.is_veg {
            self.is_veg = is_veg;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: MenuAction) -> Result<MenuActionResult, MenuError> {
        match action {
            MenuAction::AddReview(draft) => self.add_review(draft),
        }
    }
}

impl MenuItem {
    fn add_review(&mut self, draft: ReviewDraft) -> Result<MenuActionResult, MenuError> {
        if !(MIN_RATING..=MAX_RATING).contains(&draft.rating) {
            return Err(MenuError::InvalidRating(draft.rating));
        }

        // Reviews are never removed, so the count keeps ids unique per item.
        let review_id = format!("r-{}-{}", self.id, self.reviews.len() + 1);
        let review = Review {
            id: review_id.clone(),
            user_id: draft.user_id,
            user_name: draft.user_name,
            rating: draft.rating,
            comment: draft.comment,
            created_at: Utc::now(),
        };

        self.reviews.insert(0, review);
        self.rating = MenuItem::average_rating(&self.reviews);

        Ok(MenuActionResult::AddReview {
            review_id,
            rating: self.rating,
        })
    }
}
