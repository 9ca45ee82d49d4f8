//! Storage crate: feedback persistence over SQLite.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – NewFeedback, FeedbackRecord, FeedbackQuery, FeedbackStats
//! - [`feedback_repo`] – FeedbackRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod feedback_repo;
mod models;
mod sqlite_pool;

#[cfg(test)]
mod feedback_repo_test;

pub use error::StorageError;
pub use feedback_repo::FeedbackRepository;
pub use models::{FeedbackQuery, FeedbackRecord, FeedbackStats, NewFeedback};
pub use sqlite_pool::SqlitePoolManager;
