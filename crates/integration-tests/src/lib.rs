//! Shared fixtures for the integration tests.

use std::sync::Arc;

use rc_core::models::{CreatePostInput, PostCommentInput};
use rc_core::traits::{CommentNotifier, PostRepo};
use rc_notify_memory::InMemoryNotifier;
use rc_services::{CommentService, ServicePolicy};
use rc_store_memory::InMemoryPostRepo;
use uuid::Uuid;

pub fn new_post(allowed: bool) -> CreatePostInput {
    CreatePostInput {
        author_id: "author-1".into(),
        content: "a post".into(),
        are_comments_allowed: allowed,
    }
}

pub fn new_comment(post_id: Uuid, parent: Option<Uuid>, content: &str) -> PostCommentInput {
    PostCommentInput {
        post_id,
        parent_comment_id: parent,
        author_id: "author-2".into(),
        content: content.into(),
    }
}

/// A service wired to the real in-memory store and notifier.
pub fn in_memory_service() -> (CommentService, Arc<InMemoryPostRepo>, Arc<InMemoryNotifier>) {
    let repo = Arc::new(InMemoryPostRepo::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let service = CommentService::new(
        repo.clone() as Arc<dyn PostRepo>,
        notifier.clone() as Arc<dyn CommentNotifier>,
        ServicePolicy::default(),
    );
    (service, repo, notifier)
}
