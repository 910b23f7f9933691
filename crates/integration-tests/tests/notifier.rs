use std::time::Duration;

use integration_tests::{new_comment, new_post};
use rc_core::traits::{CommentNotifier, PostRepo};
use rc_notify_memory::InMemoryNotifier;
use rc_store_memory::InMemoryPostRepo;
use tokio::time::timeout;

#[tokio::test]
async fn subscriber_receives_exactly_its_topic() {
    let repo = InMemoryPostRepo::new();
    let notifier = InMemoryNotifier::new();
    let watched = repo.create_post(new_post(true)).await.unwrap();
    let other = repo.create_post(new_post(true)).await.unwrap();

    let mut sub = notifier.subscribe(watched.id);

    let elsewhere = repo.post_comment(new_comment(other.id, None, "elsewhere")).await.unwrap();
    assert_eq!(notifier.publish(&elsewhere).delivered, 0);

    let here = repo.post_comment(new_comment(watched.id, None, "here")).await.unwrap();
    assert_eq!(notifier.publish(&here).delivered, 1);

    let got = timeout(Duration::from_secs(1), sub.recv()).await.unwrap();
    assert_eq!(got, Some(here));
    assert!(sub.try_recv().is_err());
}

#[tokio::test]
async fn unsubscribed_listener_sees_end_of_stream() {
    let repo = InMemoryPostRepo::new();
    let notifier = InMemoryNotifier::new();
    let post = repo.create_post(new_post(true)).await.unwrap();

    let mut sub = notifier.subscribe(post.id);
    notifier.unsubscribe(post.id, sub.id());

    let comment = repo.post_comment(new_comment(post.id, None, "late")).await.unwrap();
    assert_eq!(notifier.publish(&comment).delivered, 0);
    assert_eq!(timeout(Duration::from_secs(1), sub.recv()).await.unwrap(), None);
}

#[tokio::test]
async fn draining_listener_gets_comments_in_publish_order() {
    let repo = InMemoryPostRepo::new();
    let notifier = InMemoryNotifier::new();
    let post = repo.create_post(new_post(true)).await.unwrap();
    let mut sub = notifier.subscribe(post.id);

    // With a one-slot mailbox the listener must drain between publishes.
    for i in 0..5 {
        let comment = repo
            .post_comment(new_comment(post.id, None, &format!("m{i}")))
            .await
            .unwrap();
        assert_eq!(notifier.publish(&comment).delivered, 1);
        assert_eq!(sub.recv().await.unwrap().content, format!("m{i}"));
    }
}

#[tokio::test]
async fn stalled_listener_does_not_block_publisher() {
    let notifier = InMemoryNotifier::new();
    let repo = InMemoryPostRepo::new();
    let post = repo.create_post(new_post(true)).await.unwrap();
    let _stalled = notifier.subscribe(post.id);

    let comment = repo.post_comment(new_comment(post.id, None, "x")).await.unwrap();
    let reports: Vec<_> = (0..100).map(|_| notifier.publish(&comment)).collect();
    assert_eq!(reports[0].delivered, 1);
    assert_eq!(reports.iter().map(|r| r.dropped).sum::<usize>(), 99);
}
