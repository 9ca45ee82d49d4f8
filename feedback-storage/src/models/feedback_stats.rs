//! Aggregate statistics for feedback.
//!
//! Returned by FeedbackRepository::get_stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total: i64,
    /// Submission counts indexed by rating 1..=5.
    pub by_rating: [i64; 5],
    pub average_rating: Option<f64>,
    pub first_submission: Option<DateTime<Utc>>,
    pub last_submission: Option<DateTime<Utc>>,
}
