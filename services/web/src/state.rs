//! Application state shared across handlers

use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: Arc::new(public_dir.into()),
        }
    }
}
