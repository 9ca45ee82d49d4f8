use std::sync::Arc;

use feedback_core::{FeedbackError, Result};
use feedback_storage::FeedbackRepository;

use crate::config::ServerConfig;
use crate::csrf::TokenSigner;

/// Shared per-request state: the repository is the only mutable surface,
/// and its own transactions serialize concurrent submissions.
#[derive(Clone)]
pub struct AppState {
    pub repo: FeedbackRepository,
    pub config: Arc<ServerConfig>,
    pub signer: Arc<TokenSigner>,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let repo = FeedbackRepository::new(&config.database_url)
            .await
            .map_err(|e| FeedbackError::Database(e.to_string()))?;
        let signer = Arc::new(TokenSigner::new(
            config.csrf_secret.as_bytes(),
            config.csrf_token_ttl_secs,
        ));

        Ok(Self {
            repo,
            config: Arc::new(config),
            signer,
        })
    }
}
