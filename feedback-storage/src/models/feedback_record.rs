//! Feedback record model for persistence.
//!
//! Maps to the `feedback` table and is used by FeedbackRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated submission that has not been persisted yet.
///
/// Carries no `id` and no `created_at`: both are assigned by the store at
/// insert time, never by the handler or the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i64,
}

/// A persisted feedback row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}
