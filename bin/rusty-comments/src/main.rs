//! # Rusty-Comments Binary
//!
//! The entry point that assembles the application: configuration first, then
//! logging, then the store, the notifier and the service facade on top.

use std::sync::Arc;

use anyhow::Context;
use rc_configs::{telemetry, AppConfig};
use rc_core::traits::{CommentNotifier, PostRepo};
use rc_notify_memory::InMemoryNotifier;
use rc_services::{CommentService, ServicePolicy};
use rc_store_memory::InMemoryPostRepo;

fn build_service(cfg: &AppConfig) -> CommentService {
    let repo: Arc<dyn PostRepo> =
        Arc::new(InMemoryPostRepo::with_max_reply_depth(cfg.limits.max_reply_depth));
    let notifier: Arc<dyn CommentNotifier> =
        Arc::new(InMemoryNotifier::with_capacity(cfg.notifier.mailbox_capacity));

    let policy = ServicePolicy {
        max_post_len: cfg.limits.max_post_len,
        max_comment_len: cfg.limits.max_comment_len,
        allow_on_missing_post: cfg.comments.allow_on_missing_post,
    };
    CommentService::new(repo, notifier, policy)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::load().context("loading configuration")?;
    telemetry::init_tracing(&cfg.logging).context("initializing logging")?;

    let service = build_service(&cfg);
    tracing::info!(
        max_post_len = service.policy().max_post_len,
        max_comment_len = service.policy().max_comment_len,
        max_reply_depth = cfg.limits.max_reply_depth,
        mailbox_capacity = cfg.notifier.mailbox_capacity,
        "rusty-comments core ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    tracing::info!("shutting down");

    Ok(())
}
