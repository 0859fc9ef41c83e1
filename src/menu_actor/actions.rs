use crate::domain::ReviewDraft;

/// Custom actions for MenuItem entities.
#[derive(Debug, Clone)]
pub enum MenuAction {
    /// Prepends a review and recomputes the aggregate rating.
    ///
    /// # Errors
    /// Fails if the rating is outside 1..=5.
    AddReview(ReviewDraft),
}

/// Results from MenuActions - variants match 1:1 with MenuAction
#[derive(Debug, Clone, PartialEq)]
pub enum MenuActionResult {
    AddReview { review_id: String, rating: f64 },
}
