//! # feedback-core
//!
//! Shared error taxonomy and tracing initialization for the feedback
//! service. Transport-agnostic; used by feedback-storage and
//! feedback-server.

pub mod error;
pub mod logger;

pub use error::{FeedbackError, Result};
pub use logger::init_tracing;
