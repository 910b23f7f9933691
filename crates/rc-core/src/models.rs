//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Comments.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level post. Owns the forest of root comments below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    /// Gates new comments (root and nested) under this post
    pub are_comments_allowed: bool,
    pub created_at: DateTime<Utc>,
    /// Empty until the first update
    pub updated_at: Option<DateTime<Utc>>,
    /// Root-level comments in insertion order
    pub comments: Vec<Comment>,
}

impl Post {
    /// Number of comments anywhere in the forest.
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(Comment::subtree_len).sum()
    }
}

/// A comment node. Replies are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Back-reference to the owning post (lookup only)
    pub post_id: Uuid,
    /// `None` for root comments
    pub parent_comment_id: Option<Uuid>,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub replies: Vec<Comment>,
}

impl Comment {
    /// This node plus every descendant reply.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.replies.iter());
        }
        count
    }

    pub fn is_root(&self) -> bool {
        self.parent_comment_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub author_id: String,
    pub content: String,
    pub are_comments_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCommentInput {
    pub post_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub author_id: String,
    pub content: String,
}

/// Partial update: `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutPostInput {
    pub id: Uuid,
    pub content: Option<String>,
    pub are_comments_allowed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutCommentInput {
    pub post_id: Uuid,
    pub id: Uuid,
    pub content: String,
}
