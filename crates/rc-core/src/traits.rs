//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, CreatePostInput, Post, PostCommentInput, PutCommentInput, PutPostInput};
use crate::subscription::{PublishReport, SubscriberId, Subscription};

/// Number of posts returned by one `get_posts` page.
pub const PAGE_SIZE: usize = 10;

/// Persistence contract for posts and their comment trees.
///
/// Implementations assume pre-validated input and never log; every policy
/// decision belongs to the caller.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    // Post Operations
    async fn create_post(&self, input: CreatePostInput) -> Result<Post>;
    async fn put_post(&self, input: PutPostInput) -> Result<Post>;
    /// `Ok(false)` when no post had that id.
    async fn delete_post(&self, id: Uuid) -> Result<bool>;
    /// Posts ordered by id ascending, `PAGE_SIZE` at a time starting at `offset`.
    async fn get_posts(&self, offset: usize) -> Result<Vec<Post>>;
    async fn get_post_by_id(&self, id: Uuid) -> Result<Post>;

    // Comment Operations
    async fn post_comment(&self, input: PostCommentInput) -> Result<Comment>;
    async fn put_comment(&self, input: PutCommentInput) -> Result<Comment>;
    /// Removes the comment and its whole reply subtree, looked up across all posts.
    async fn delete_comment(&self, id: Uuid) -> Result<bool>;
    /// Root-level comments of a post; at most `first` when `first > 0`.
    async fn get_comments_by_post_id(&self, post_id: Uuid, first: usize) -> Result<Vec<Comment>>;
    /// Every comment in any post whose parent is `parent_id`; at most `first` when `first > 0`.
    async fn get_comments_by_parent_comment_id(
        &self,
        parent_id: Uuid,
        first: usize,
    ) -> Result<Vec<Comment>>;
}

/// Topic-keyed delivery of new comments to live listeners.
/// The topic is always the post id.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait CommentNotifier: Send + Sync {
    /// Registers a fresh mailbox under `topic`.
    fn subscribe(&self, topic: Uuid) -> Subscription;

    /// Removes and closes the endpoint. Unknown endpoints are ignored.
    fn unsubscribe(&self, topic: Uuid, subscriber: SubscriberId);

    /// Fans the comment out to every endpoint registered under its post id.
    /// Never blocks on a slow subscriber.
    fn publish(&self, comment: &Comment) -> PublishReport;

    /// Whether any endpoint is currently registered under `topic`.
    fn check(&self, topic: Uuid) -> bool;
}
