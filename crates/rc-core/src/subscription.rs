//! # Subscription endpoints
//!
//! A subscription is one mailbox registered under a topic (a post id).

use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::Comment;

/// Identifies one endpoint within a notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// The receiving half of a mailbox handed to a subscriber.
///
/// `recv` yields `None` once the notifier has unsubscribed the endpoint and
/// every pending comment has been drained.
#[derive(Debug)]
pub struct Subscription {
    topic: Uuid,
    id: SubscriberId,
    receiver: mpsc::Receiver<Comment>,
}

impl Subscription {
    pub fn new(topic: Uuid, id: SubscriberId, receiver: mpsc::Receiver<Comment>) -> Self {
        Self { topic, id, receiver }
    }

    pub fn topic(&self) -> Uuid {
        self.topic
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next comment. `None` means end-of-stream.
    pub async fn recv(&mut self) -> Option<Comment> {
        self.receiver.recv().await
    }

    /// Non-blocking poll of the mailbox.
    pub fn try_recv(&mut self) -> Result<Comment, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

/// Outcome of a single fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Endpoints whose mailbox accepted the comment
    pub delivered: usize,
    /// Endpoints whose mailbox was full; the comment was dropped for them
    pub dropped: usize,
    /// Endpoints removed because their receiver was gone
    pub pruned: usize,
}
