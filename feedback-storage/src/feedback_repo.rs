//! Feedback repository: persistence and queries for feedback records.
//!
//! Uses SqlitePoolManager and the models (NewFeedback, FeedbackRecord,
//! FeedbackQuery, FeedbackStats). External: SQLite via sqlx; callers use
//! insert/list/get_stats etc.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{FeedbackQuery, FeedbackRecord, FeedbackStats, NewFeedback};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct FeedbackRepository {
    pool_manager: SqlitePoolManager,
}

impl FeedbackRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                rating INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_feedback_created_at ON feedback(created_at);
            CREATE INDEX IF NOT EXISTS idx_feedback_rating ON feedback(rating);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Persists a validated submission as a single atomic insert.
    ///
    /// The store assigns `id` and `created_at` here; callers never supply
    /// either. Returns the persisted row.
    #[instrument(skip(self, feedback))]
    pub async fn insert(&self, feedback: &NewFeedback) -> Result<FeedbackRecord, StorageError> {
        let pool = self.pool_manager.pool();

        let record = FeedbackRecord {
            id: Uuid::new_v4().to_string(),
            name: feedback.name.clone(),
            email: feedback.email.clone(),
            message: feedback.message.clone(),
            rating: feedback.rating,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO feedback (id, name, email, message, rating, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.message)
        .bind(record.rating)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(id = %record.id, rating = record.rating, "Saved feedback record");
        Ok(record)
    }

    /// Lists records for the admin viewer, most recent first.
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &FeedbackQuery) -> Result<Vec<FeedbackRecord>, StorageError> {
        let pool = self.pool_manager.pool();
        let mut sql = String::from("SELECT * FROM feedback WHERE 1=1");
        let mut params: Vec<String> = Vec::new();

        if let Some(rating) = query.rating {
            sql.push_str(" AND rating = ?");
            params.push(rating.to_string());
        }

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            sql.push_str(" AND (name LIKE ? OR email LIKE ? OR message LIKE ?)");
            let pattern = format!("%{}%", search);
            params.push(pattern.clone());
            params.push(pattern.clone());
            params.push(pattern);
        }

        sql.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
            if let Some(offset) = query.offset {
                sql.push_str(&format!(" OFFSET {}", offset));
            }
        }

        let mut query_builder = sqlx::query_as::<_, FeedbackRecord>(&sql);
        for param in &params {
            query_builder = query_builder.bind(param);
        }

        let records: Vec<FeedbackRecord> = query_builder.fetch_all(pool).await?;
        info!("Retrieved {} feedback records", records.len());

        Ok(records)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<FeedbackRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, FeedbackRecord>("SELECT * FROM feedback WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(pool)
            .await?;

        Ok(total.0)
    }

    pub async fn get_stats(&self) -> Result<FeedbackStats, StorageError> {
        let pool = self.pool_manager.pool();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(pool)
            .await?;

        let mut by_rating = [0i64; 5];
        let rows: Vec<(i64, i64)> =
            sqlx::query_as("SELECT rating, COUNT(*) FROM feedback GROUP BY rating")
                .fetch_all(pool)
                .await?;
        for (rating, count) in rows {
            if (1..=5).contains(&rating) {
                by_rating[(rating - 1) as usize] = count;
            }
        }

        let average_rating: (Option<f64>,) = sqlx::query_as("SELECT AVG(rating) FROM feedback")
            .fetch_one(pool)
            .await?;

        // MIN/MAX on an empty table yield a single NULL row.
        let first_submission: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MIN(created_at) FROM feedback")
                .fetch_one(pool)
                .await?;

        let last_submission: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(created_at) FROM feedback")
                .fetch_one(pool)
                .await?;

        Ok(FeedbackStats {
            total: total.0,
            by_rating,
            average_rating: average_rating.0,
            first_submission: first_submission.0,
            last_submission: last_submission.0,
        })
    }
}
