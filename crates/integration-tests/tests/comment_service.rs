use std::time::Duration;

use integration_tests::{in_memory_service, new_comment, new_post};
use rc_core::error::AppError;
use rc_core::models::{PutCommentInput, PutPostInput};
use rc_store_memory::DEFAULT_MAX_REPLY_DEPTH;
use tokio::time::timeout;
use uuid::Uuid;

#[tokio::test]
async fn created_comment_reaches_live_stream() {
    let (service, _repo, notifier) = in_memory_service();
    let post = service.create_post(new_post(true)).await.unwrap();

    let mut stream = service.subscribe(post.id).await.unwrap();
    let created = service
        .post_comment(new_comment(post.id, None, "hello"))
        .await
        .unwrap();

    let got = timeout(Duration::from_secs(1), stream.next()).await.unwrap();
    assert_eq!(got, Some(created));

    drop(stream);
    assert_eq!(notifier.subscriber_count(post.id), 0);
}

#[tokio::test]
async fn cancelled_stream_ends_and_misses_later_comments() {
    let (service, _repo, notifier) = in_memory_service();
    let post = service.create_post(new_post(true)).await.unwrap();

    let mut stream = service.subscribe(post.id).await.unwrap();
    stream.cancel();
    assert_eq!(notifier.subscriber_count(post.id), 0);

    service.post_comment(new_comment(post.id, None, "after")).await.unwrap();
    assert_eq!(timeout(Duration::from_secs(1), stream.next()).await.unwrap(), None);
}

#[tokio::test]
async fn subscribing_to_unknown_post_fails() {
    let (service, _repo, _notifier) = in_memory_service();
    let ghost = Uuid::now_v7();
    let err = service.subscribe(ghost).await.err().unwrap();
    assert_eq!(err, AppError::PostNotFound(ghost));
}

#[tokio::test]
async fn live_topic_skips_the_existence_check() {
    let (service, _repo, _notifier) = in_memory_service();
    let post = service.create_post(new_post(true)).await.unwrap();
    let _first = service.subscribe(post.id).await.unwrap();

    // The topic is live, so a second listener attaches even after the post is gone.
    assert!(service.delete_post(post.id).await.unwrap());
    assert!(service.subscribe(post.id).await.is_ok());
}

#[tokio::test]
async fn disabled_comments_are_rejected_and_not_published() {
    let (service, _repo, _notifier) = in_memory_service();
    let post = service.create_post(new_post(true)).await.unwrap();
    let mut stream = service.subscribe(post.id).await.unwrap();

    service
        .put_post(PutPostInput { id: post.id, content: None, are_comments_allowed: Some(false) })
        .await
        .unwrap();

    let err = service
        .post_comment(new_comment(post.id, None, "blocked"))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::CommentsNotAllowed(post.id));
    assert!(service.get_comments_by_post_id(post.id, 0).await.unwrap().is_empty());

    stream.cancel();
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn full_flow_through_the_facade() {
    let (service, repo, _notifier) = in_memory_service();
    let p1 = service.create_post(new_post(true)).await.unwrap();
    let c1 = service.post_comment(new_comment(p1.id, None, "C1")).await.unwrap();
    let c2 = service
        .post_comment(new_comment(p1.id, Some(c1.id), "C2"))
        .await
        .unwrap();

    let edited = service
        .put_comment(PutCommentInput { post_id: p1.id, id: c2.id, content: "C2 edited".into() })
        .await
        .unwrap();
    assert_eq!(edited.content, "C2 edited");

    let children = service.get_comments_by_parent_comment_id(c1.id, 0).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].content, "C2 edited");

    assert!(service.delete_comment(c1.id).await.unwrap());
    assert!(service.get_comments_by_post_id(p1.id, 0).await.unwrap().is_empty());
    assert!(service.get_comments_by_parent_comment_id(c1.id, 0).await.unwrap().is_empty());
    assert_eq!(service.get_posts(0).await.unwrap().len(), 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn oversized_content_is_a_validation_error() {
    let (service, repo, _notifier) = in_memory_service();
    let mut input = new_post(true);
    input.content = "x".repeat(10_001);
    assert!(matches!(service.create_post(input).await, Err(AppError::ValidationError(_))));
    assert!(repo.is_empty().await);

    let post = service.create_post(new_post(true)).await.unwrap();
    let err = service
        .post_comment(new_comment(post.id, None, &"x".repeat(2_001)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn deepest_reply_chain_reads_and_deletes() {
    let (service, repo, _notifier) = in_memory_service();
    let post = service.create_post(new_post(true)).await.unwrap();

    let mut chain = Vec::with_capacity(DEFAULT_MAX_REPLY_DEPTH);
    let mut parent = None;
    for depth in 1..=DEFAULT_MAX_REPLY_DEPTH {
        let comment = service
            .post_comment(new_comment(post.id, parent, &format!("d{depth}")))
            .await
            .unwrap();
        parent = Some(comment.id);
        chain.push(comment.id);
    }

    let err = service
        .post_comment(new_comment(post.id, parent, "too deep"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let stored = service.get_post_by_id(post.id).await.unwrap();
    assert_eq!(stored.comment_count(), DEFAULT_MAX_REPLY_DEPTH);

    let second_last = chain[DEFAULT_MAX_REPLY_DEPTH - 2];
    let bottom = service.get_comments_by_parent_comment_id(second_last, 0).await.unwrap();
    assert_eq!(bottom.len(), 1);
    assert_eq!(bottom[0].id, chain[DEFAULT_MAX_REPLY_DEPTH - 1]);

    let edited = service
        .put_comment(PutCommentInput { post_id: post.id, id: bottom[0].id, content: "bottom".into() })
        .await
        .unwrap();
    assert_eq!(edited.content, "bottom");

    assert!(service.delete_comment(chain[0]).await.unwrap());
    assert_eq!(service.get_post_by_id(post.id).await.unwrap().comment_count(), 0);
    assert_eq!(repo.len().await, 1);
}
