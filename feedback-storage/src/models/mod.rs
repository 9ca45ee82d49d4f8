//! Persistence models.

mod feedback_query;
mod feedback_record;
mod feedback_stats;

pub use feedback_query::FeedbackQuery;
pub use feedback_record::{FeedbackRecord, NewFeedback};
pub use feedback_stats::FeedbackStats;
