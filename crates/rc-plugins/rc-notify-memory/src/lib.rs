//! # rc-notify-memory
//!
//! In-memory implementation of `CommentNotifier`.
//!
//! Each subscriber owns a bounded mailbox (capacity 1 by default). Publishing
//! never waits: a full mailbox drops the comment for that subscriber, and a
//! mailbox whose receiver is gone is pruned. Subscribers that fall behind miss
//! messages instead of stalling the publisher.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rc_core::models::Comment;
use rc_core::subscription::{PublishReport, SubscriberId, Subscription};
use rc_core::traits::CommentNotifier;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

pub const DEFAULT_MAILBOX_CAPACITY: usize = 1;

struct Endpoint {
    id: SubscriberId,
    sender: mpsc::Sender<Comment>,
}

type Topics = HashMap<Uuid, Vec<Endpoint>>;

pub struct InMemoryNotifier {
    topics: Mutex<Topics>,
    next_id: AtomicU64,
    mailbox_capacity: usize,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAILBOX_CAPACITY)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(mailbox_capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            mailbox_capacity: mailbox_capacity.max(1),
        }
    }

    /// Number of endpoints registered under `topic`.
    pub fn subscriber_count(&self, topic: Uuid) -> usize {
        self.lock().get(&topic).map_or(0, Vec::len)
    }

    // Every critical section leaves the map consistent, so a poisoned lock
    // is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Topics> {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentNotifier for InMemoryNotifier {
    fn subscribe(&self, topic: Uuid) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::channel(self.mailbox_capacity);

        self.lock().entry(topic).or_default().push(Endpoint { id, sender });

        Subscription::new(topic, id, receiver)
    }

    /// Dropping the sender closes the mailbox: the receiver drains whatever is
    /// pending and then sees end-of-stream.
    fn unsubscribe(&self, topic: Uuid, subscriber: SubscriberId) {
        let mut topics = self.lock();
        if let Some(endpoints) = topics.get_mut(&topic) {
            endpoints.retain(|endpoint| endpoint.id != subscriber);
            if endpoints.is_empty() {
                topics.remove(&topic);
            }
        }
    }

    fn publish(&self, comment: &Comment) -> PublishReport {
        let mut report = PublishReport::default();
        let mut topics = self.lock();
        let Some(endpoints) = topics.get_mut(&comment.post_id) else {
            return report;
        };

        endpoints.retain(|endpoint| match endpoint.sender.try_send(comment.clone()) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                report.dropped += 1;
                true
            }
            Err(TrySendError::Closed(_)) => {
                report.pruned += 1;
                false
            }
        });
        if endpoints.is_empty() {
            topics.remove(&comment.post_id);
        }

        report
    }

    fn check(&self, topic: Uuid) -> bool {
        self.lock().contains_key(&topic)
    }
}
