//! Unit tests for FeedbackRepository.
//!
//! Covers insert, get_by_id, list ordering/filtering and stats.

use crate::feedback_repo::FeedbackRepository;
use crate::models::{FeedbackQuery, NewFeedback};

fn sample(name: &str, rating: i64) -> NewFeedback {
    NewFeedback {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        message: format!("Message from {}", name),
        rating,
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_created_at() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let before = chrono::Utc::now();
    let record = repo
        .insert(&sample("Ada", 5))
        .await
        .expect("Failed to insert feedback");

    assert!(!record.id.is_empty());
    assert!(record.created_at >= before);
    assert_eq!(record.rating, 5);

    let retrieved = repo
        .get_by_id(&record.id)
        .await
        .expect("Failed to get feedback")
        .expect("Record should exist");
    assert_eq!(retrieved.name, "Ada");
    assert_eq!(retrieved.email, "ada@example.com");
    assert_eq!(retrieved.message, "Message from Ada");
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let retrieved = repo
        .get_by_id("non-existent-id")
        .await
        .expect("Failed to query");

    assert!(retrieved.is_none());
}

#[tokio::test]
async fn test_list_orders_most_recent_first() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let mut ids = Vec::new();
    for i in 0..5 {
        let record = repo
            .insert(&sample(&format!("User{}", i), 3))
            .await
            .expect("Failed to insert feedback");
        ids.push(record.id);
        // created_at has millisecond precision; keep inserts distinct.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let records = repo
        .list(&FeedbackQuery::default())
        .await
        .expect("Failed to list feedback");

    assert_eq!(records.len(), 5);
    for pair in records.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    assert_eq!(records[0].id, ids[4]);
    assert_eq!(records[4].id, ids[0]);
}

#[tokio::test]
async fn test_list_filters_by_rating() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.insert(&sample("Happy", 5)).await.expect("insert");
    repo.insert(&sample("Grumpy", 1)).await.expect("insert");
    repo.insert(&sample("Cheerful", 5)).await.expect("insert");

    let query = FeedbackQuery {
        rating: Some(5),
        ..Default::default()
    };
    let records = repo.list(&query).await.expect("Failed to list feedback");

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.rating, 5);
    }
}

#[tokio::test]
async fn test_list_searches_name_email_message() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.insert(&sample("Ada", 4)).await.expect("insert");
    repo.insert(&sample("Grace", 4)).await.expect("insert");
    repo.insert(&NewFeedback {
        name: "Anon".to_string(),
        email: "anon@example.com".to_string(),
        message: "Loved the ada demo".to_string(),
        rating: 3,
    })
    .await
    .expect("insert");

    let query = FeedbackQuery {
        search: Some("ada".to_string()),
        ..Default::default()
    };
    let records = repo.list(&query).await.expect("Failed to list feedback");

    // Matches Ada by name/email and Anon by message content.
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_list_respects_limit_and_offset() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for i in 0..10 {
        repo.insert(&sample(&format!("User{}", i), 3))
            .await
            .expect("insert");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let query = FeedbackQuery {
        limit: Some(4),
        offset: Some(2),
        ..Default::default()
    };
    let records = repo.list(&query).await.expect("Failed to list feedback");

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].name, "User7");
}

#[tokio::test]
async fn test_stats_empty_store() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let stats = repo.get_stats().await.expect("Failed to get stats");

    assert_eq!(stats.total, 0);
    assert_eq!(stats.by_rating, [0; 5]);
    assert!(stats.average_rating.is_none());
    assert!(stats.first_submission.is_none());
    assert!(stats.last_submission.is_none());
}

#[tokio::test]
async fn test_stats_counts_and_average() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.insert(&sample("A", 5)).await.expect("insert");
    repo.insert(&sample("B", 5)).await.expect("insert");
    repo.insert(&sample("C", 1)).await.expect("insert");

    let stats = repo.get_stats().await.expect("Failed to get stats");

    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_rating, [1, 0, 0, 0, 2]);
    let avg = stats.average_rating.expect("average should exist");
    assert!((avg - 11.0 / 3.0).abs() < 1e-9);
    assert!(stats.first_submission.is_some());
    assert!(stats.last_submission.unwrap() >= stats.first_submission.unwrap());
}

#[tokio::test]
async fn test_count() {
    let repo = FeedbackRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    assert_eq!(repo.count().await.expect("count"), 0);
    repo.insert(&sample("A", 2)).await.expect("insert");
    assert_eq!(repo.count().await.expect("count"), 1);
}
