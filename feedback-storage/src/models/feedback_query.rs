//! Query parameters for listing/filtering feedback.
//!
//! Used by FeedbackRepository::list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackQuery {
    /// Exact rating to filter on (1..=5).
    pub rating: Option<i64>,
    /// Free-text search over name, email and message.
    pub search: Option<String>,
    pub limit: Option<i64>,
    /// Pagination offset (used with limit).
    pub offset: Option<i64>,
}
