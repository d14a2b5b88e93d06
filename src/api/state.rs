use std::sync::Arc;

use crate::source::SnapshotCache;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self {
            cache,
            cors_origin: "*".to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }
}
