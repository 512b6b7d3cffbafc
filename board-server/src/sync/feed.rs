//! Live collection feeds
//!
//! A feed watches one collection (all boards, a board's lists, a list's
//! tasks) and invokes its callback with the full current ordered collection:
//! once immediately after subscribing, then again after every committed
//! mutation in the watched scope. The guard returned from a subscribe call
//! is the only detach mechanism; once cancelled (explicitly or by drop) no
//! further callbacks are delivered.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use super::hub::{ChangeHub, EntityKind};
use crate::db::repository::RepoResult;

/// Subscriber callback, invoked with the full ordered collection
pub type FeedCallback<T> = Arc<dyn Fn(Vec<T>) + Send + Sync>;

/// Detach handle for a live feed
///
/// Cancelling (or dropping) the guard permanently stops the feed task.
#[derive(Debug)]
pub struct FeedGuard {
    token: CancellationToken,
}

impl FeedGuard {
    /// Permanently detach the feed; no further callbacks will run
    pub fn unsubscribe(&self) {
        self.token.cancel();
    }
}

impl Drop for FeedGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawn a feed task for one (kind, scope) collection
///
/// `fetch` loads the current ordered collection from the store. Fetch
/// failures are logged and the feed stays alive; the next change in scope
/// triggers a fresh attempt. A lagged broadcast receiver also just
/// re-fetches: a current snapshot supersedes any number of missed
/// notifications.
pub(crate) fn spawn_feed<T, F, Fut>(
    hub: &ChangeHub,
    kind: EntityKind,
    scope: String,
    fetch: F,
    callback: FeedCallback<T>,
) -> FeedGuard
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = RepoResult<Vec<T>>> + Send + 'static,
{
    // Subscribe before the initial fetch so no mutation between the two
    // can be missed.
    let mut rx = hub.subscribe_changes();
    let token = CancellationToken::new();
    let task_token = token.clone();

    tokio::spawn(async move {
        let mut refresh = true;
        loop {
            if refresh {
                if task_token.is_cancelled() {
                    break;
                }
                match fetch().await {
                    Ok(items) => {
                        // Checked again so an unsubscribe during the fetch
                        // suppresses the delivery.
                        if task_token.is_cancelled() {
                            break;
                        }
                        callback(items);
                    }
                    Err(e) => {
                        tracing::warn!(scope = %scope, error = %e, "Feed fetch failed, keeping feed alive");
                    }
                }
                refresh = false;
            }

            tokio::select! {
                _ = task_token.cancelled() => break,
                event = rx.recv() => match event {
                    Ok(ev) => {
                        if ev.kind == kind && ev.scope == scope {
                            refresh = true;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(scope = %scope, skipped, "Feed lagged behind change stream, resyncing");
                        refresh = true;
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    });

    FeedGuard { token }
}
