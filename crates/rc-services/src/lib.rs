//! # rc-services
//!
//! The request-facing facade over the post store and the comment notifier.
//! Validates content, enforces the comments-allowed flag, and publishes every
//! newly created comment to live subscribers.

mod stream;
pub mod validation;

use std::sync::Arc;

use rc_core::error::{AppError, Result};
use rc_core::models::{Comment, CreatePostInput, Post, PostCommentInput, PutCommentInput, PutPostInput};
use rc_core::traits::{CommentNotifier, PostRepo};
use uuid::Uuid;

pub use stream::CommentStream;
use validation::validate_content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePolicy {
    pub max_post_len: usize,
    pub max_comment_len: usize,
    /// When the post lookup before a new comment fails, let the comment
    /// through instead of returning `PostNotFound`.
    pub allow_on_missing_post: bool,
}

impl Default for ServicePolicy {
    fn default() -> Self {
        Self {
            max_post_len: 10_000,
            max_comment_len: 2_000,
            allow_on_missing_post: false,
        }
    }
}

pub struct CommentService {
    repo: Arc<dyn PostRepo>,
    notifier: Arc<dyn CommentNotifier>,
    policy: ServicePolicy,
}

impl CommentService {
    pub fn new(repo: Arc<dyn PostRepo>, notifier: Arc<dyn CommentNotifier>, policy: ServicePolicy) -> Self {
        Self { repo, notifier, policy }
    }

    pub fn policy(&self) -> &ServicePolicy {
        &self.policy
    }

    pub async fn create_post(&self, input: CreatePostInput) -> Result<Post> {
        validate_content(&input.content, self.policy.max_post_len, "post")?;

        let post = self.repo.create_post(input).await?;
        tracing::debug!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Creates the comment, then publishes it to the post's subscribers.
    pub async fn post_comment(&self, input: PostCommentInput) -> Result<Comment> {
        validate_content(&input.content, self.policy.max_comment_len, "comment")?;
        self.ensure_comments_allowed(input.post_id).await?;

        let comment = self.repo.post_comment(input).await?;
        let report = self.notifier.publish(&comment);
        tracing::debug!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            delivered = report.delivered,
            dropped = report.dropped,
            pruned = report.pruned,
            "comment created"
        );
        if report.dropped > 0 {
            tracing::warn!(
                comment_id = %comment.id,
                dropped = report.dropped,
                "subscribers with a full mailbox missed a comment"
            );
        }
        Ok(comment)
    }

    async fn ensure_comments_allowed(&self, post_id: Uuid) -> Result<()> {
        match self.repo.get_post_by_id(post_id).await {
            Ok(post) if !post.are_comments_allowed => Err(AppError::CommentsNotAllowed(post_id)),
            Ok(_) => Ok(()),
            Err(err) if self.policy.allow_on_missing_post => {
                tracing::warn!(%post_id, error = %err, "post lookup failed, accepting comment anyway");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn put_post(&self, input: PutPostInput) -> Result<Post> {
        if let Some(content) = &input.content {
            validate_content(content, self.policy.max_post_len, "post")?;
        }
        let post = self.repo.put_post(input).await?;
        tracing::debug!(post_id = %post.id, "post updated");
        Ok(post)
    }

    pub async fn put_comment(&self, input: PutCommentInput) -> Result<Comment> {
        validate_content(&input.content, self.policy.max_comment_len, "comment")?;
        let comment = self.repo.put_comment(input).await?;
        tracing::debug!(comment_id = %comment.id, "comment updated");
        Ok(comment)
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<bool> {
        let deleted = self.repo.delete_post(id).await?;
        tracing::debug!(post_id = %id, deleted, "delete post");
        Ok(deleted)
    }

    pub async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let deleted = self.repo.delete_comment(id).await?;
        tracing::debug!(comment_id = %id, deleted, "delete comment");
        Ok(deleted)
    }

    pub async fn get_posts(&self, offset: usize) -> Result<Vec<Post>> {
        self.repo.get_posts(offset).await
    }

    pub async fn get_post_by_id(&self, id: Uuid) -> Result<Post> {
        self.repo.get_post_by_id(id).await
    }

    pub async fn get_comments_by_post_id(&self, post_id: Uuid, first: usize) -> Result<Vec<Comment>> {
        self.repo.get_comments_by_post_id(post_id, first).await
    }

    pub async fn get_comments_by_parent_comment_id(
        &self,
        parent_id: Uuid,
        first: usize,
    ) -> Result<Vec<Comment>> {
        self.repo.get_comments_by_parent_comment_id(parent_id, first).await
    }

    /// Opens a live feed of new comments on `post_id`.
    ///
    /// The post must exist, unless the topic already has listeners, in which
    /// case the lookup is skipped.
    pub async fn subscribe(&self, post_id: Uuid) -> Result<CommentStream> {
        if !self.notifier.check(post_id) {
            self.repo.get_post_by_id(post_id).await?;
        }

        let subscription = self.notifier.subscribe(post_id);
        tracing::debug!(%post_id, subscriber = %subscription.id(), "comment stream opened");
        Ok(CommentStream::new(self.notifier.clone(), subscription))
    }
}
