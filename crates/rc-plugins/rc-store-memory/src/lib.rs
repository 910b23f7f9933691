//! # rc-store-memory
//!
//! In-memory implementation of `PostRepo`.
//! Posts own their comment forests directly; every operation runs under one
//! coarse mutex, so reads and writes share a single total order.

mod tree;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rc_core::error::{AppError, Result};
use rc_core::models::{Comment, CreatePostInput, Post, PostCommentInput, PutCommentInput, PutPostInput};
use rc_core::traits::{PostRepo, PAGE_SIZE};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Deepest reply accepted by default; root comments are at depth 1.
pub const DEFAULT_MAX_REPLY_DEPTH: usize = 256;

/// Keyed by id; UUIDv7 keys make iteration order match creation order.
pub struct InMemoryPostRepo {
    posts: Mutex<BTreeMap<Uuid, Post>>,
    max_reply_depth: usize,
}

impl Default for InMemoryPostRepo {
    fn default() -> Self {
        Self::with_max_reply_depth(DEFAULT_MAX_REPLY_DEPTH)
    }
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment trees are cloned and dropped recursively, so their depth is
    /// bounded. Values below 1 are raised to 1.
    pub fn with_max_reply_depth(max_reply_depth: usize) -> Self {
        Self {
            posts: Mutex::new(BTreeMap::new()),
            max_reply_depth: max_reply_depth.max(1),
        }
    }

    pub fn max_reply_depth(&self) -> usize {
        self.max_reply_depth
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.posts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.lock().await.is_empty()
    }
}

fn take_first(mut comments: Vec<Comment>, first: usize) -> Vec<Comment> {
    if first > 0 {
        comments.truncate(first);
    }
    comments
}

#[async_trait]
impl PostRepo for InMemoryPostRepo {
    async fn create_post(&self, input: CreatePostInput) -> Result<Post> {
        let mut posts = self.posts.lock().await;

        let post = Post {
            id: Uuid::now_v7(),
            author_id: input.author_id,
            content: input.content,
            are_comments_allowed: input.are_comments_allowed,
            created_at: Utc::now(),
            updated_at: None,
            comments: Vec::new(),
        };
        posts.insert(post.id, post.clone());

        Ok(post)
    }

    /// Applies only the fields present in `input` and stamps `updated_at`.
    async fn put_post(&self, input: PutPostInput) -> Result<Post> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .get_mut(&input.id)
            .ok_or(AppError::PostNotFound(input.id))?;

        if let Some(content) = input.content {
            post.content = content;
        }
        if let Some(allowed) = input.are_comments_allowed {
            post.are_comments_allowed = allowed;
        }
        post.updated_at = Some(Utc::now());

        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool> {
        Ok(self.posts.lock().await.remove(&id).is_some())
    }

    async fn get_posts(&self, offset: usize) -> Result<Vec<Post>> {
        let posts = self.posts.lock().await;
        Ok(posts.values().skip(offset).take(PAGE_SIZE).cloned().collect())
    }

    async fn get_post_by_id(&self, id: Uuid) -> Result<Post> {
        self.posts
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::PostNotFound(id))
    }

    /// Appends to the post's root list, or to the replies of the parent found
    /// by a depth-first search of that post's forest. A reply that would sit
    /// deeper than the configured limit is a validation error.
    async fn post_comment(&self, input: PostCommentInput) -> Result<Comment> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .get_mut(&input.post_id)
            .ok_or(AppError::PostNotFound(input.post_id))?;

        let comment = Comment {
            id: Uuid::now_v7(),
            post_id: input.post_id,
            parent_comment_id: input.parent_comment_id,
            author_id: input.author_id,
            content: input.content,
            created_at: Utc::now(),
            updated_at: None,
            replies: Vec::new(),
        };

        match input.parent_comment_id {
            None => post.comments.push(comment.clone()),
            Some(parent_id) => {
                let path = tree::path_to(&post.comments, parent_id)
                    .ok_or(AppError::ParentNotFound(parent_id))?;
                if path.len() >= self.max_reply_depth {
                    return Err(AppError::ValidationError(format!(
                        "reply depth limit of {} reached",
                        self.max_reply_depth
                    )));
                }
                tree::node_at(&mut post.comments, &path)
                    .ok_or(AppError::ParentNotFound(parent_id))?
                    .replies
                    .push(comment.clone());
            }
        }

        Ok(comment)
    }

    async fn put_comment(&self, input: PutCommentInput) -> Result<Comment> {
        let mut posts = self.posts.lock().await;
        let post = posts
            .get_mut(&input.post_id)
            .ok_or(AppError::PostNotFound(input.post_id))?;
        let comment = tree::find_mut(&mut post.comments, input.id)
            .ok_or(AppError::CommentNotFound(input.id))?;

        comment.content = input.content;
        comment.updated_at = Some(Utc::now());

        Ok(comment.clone())
    }

    /// Store-wide lookup: the first post whose forest holds the id loses that
    /// node and its whole reply subtree.
    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let mut posts = self.posts.lock().await;
        let removed = posts
            .values_mut()
            .any(|post| tree::remove(&mut post.comments, id).is_some());
        Ok(removed)
    }

    async fn get_comments_by_post_id(&self, post_id: Uuid, first: usize) -> Result<Vec<Comment>> {
        let posts = self.posts.lock().await;
        let post = posts.get(&post_id).ok_or(AppError::PostNotFound(post_id))?;
        Ok(take_first(post.comments.clone(), first))
    }

    /// Full scan of every post in id order.
    async fn get_comments_by_parent_comment_id(
        &self,
        parent_id: Uuid,
        first: usize,
    ) -> Result<Vec<Comment>> {
        let posts = self.posts.lock().await;
        let mut found = Vec::new();
        for post in posts.values() {
            tree::collect_by_parent(&post.comments, parent_id, &mut found);
        }
        Ok(take_first(found, first))
    }
}
