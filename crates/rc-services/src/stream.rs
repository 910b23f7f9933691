use std::sync::Arc;

use rc_core::models::Comment;
use rc_core::subscription::Subscription;
use rc_core::traits::CommentNotifier;
use uuid::Uuid;

/// A live feed of new comments on one post.
///
/// The feed is tied to its scope: dropping it unsubscribes the endpoint.
/// `cancel` unsubscribes early while keeping the mailbox readable, so the
/// holder drains anything pending and then sees `None`.
pub struct CommentStream {
    notifier: Arc<dyn CommentNotifier>,
    subscription: Subscription,
}

impl CommentStream {
    pub(crate) fn new(notifier: Arc<dyn CommentNotifier>, subscription: Subscription) -> Self {
        Self { notifier, subscription }
    }

    pub fn post_id(&self) -> Uuid {
        self.subscription.topic()
    }

    /// Next comment, or `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<Comment> {
        self.subscription.recv().await
    }

    pub fn cancel(&self) {
        self.notifier
            .unsubscribe(self.subscription.topic(), self.subscription.id());
    }
}

impl Drop for CommentStream {
    fn drop(&mut self) {
        tracing::debug!(
            post_id = %self.subscription.topic(),
            subscriber = %self.subscription.id(),
            "closing comment stream"
        );
        self.cancel();
    }
}
