use std::sync::Arc;

use devblog_lib::{models::admin::AdminTokens, repos::r_posts::PostsStore};

/// Shared by every handler. Holds nothing that changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostsStore>,
    pub tokens: Arc<AdminTokens>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostsStore>, tokens: AdminTokens) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}
