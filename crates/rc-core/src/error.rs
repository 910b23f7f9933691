//! # AppError
//!
//! Centralized error handling for the Rusty-Comments ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all rc-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("post not found with ID {0}")]
    PostNotFound(Uuid),

    #[error("comment not found with ID {0}")]
    CommentNotFound(Uuid),

    /// The `parent_comment_id` of a new comment does not exist under its post
    #[error("parent comment not found with ID {0}")]
    ParentNotFound(Uuid),

    /// Validation failure (e.g., empty content, comment too long)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The post has `are_comments_allowed = false`
    #[error("comments are not allowed on post {0}")]
    CommentsNotAllowed(Uuid),

    /// Infrastructure failure in an alternative backend
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Rusty-Comments logic.
pub type Result<T> = std::result::Result<T, AppError>;
