//! Error types for the view-model store
//!
//! Every store operation either applies completely or is rejected before it
//! touches any collection. The variants below are the only rejections.

use thiserror::Error;

use crate::models::{Role, VideoId};

/// Custom error type for store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The operation needs an active session
    #[error("Login required")]
    LoginRequired,

    /// The active session's role lacks the capability
    #[error("Permission denied for role {role}")]
    PermissionDenied { role: Role },

    /// The referenced video does not exist
    #[error("Video not found: {0}")]
    VideoNotFound(VideoId),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
