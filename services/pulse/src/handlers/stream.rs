//! Server-Sent Event snapshots driven by the change feed.

use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use serde::Serialize;

use crate::error::PulseServiceError;
use crate::infra::feed::{ChangeFeed, Collection, Subscription};

/// Emit `snapshot()` now, then again after every change to `watched`.
///
/// The stream ends when the feed closes or the client disconnects. A failed
/// snapshot is sent as an `error` event and the stream keeps watching.
pub fn watch_snapshots<F, Fut, T>(
    feed: &ChangeFeed,
    watched: &[Collection],
    snapshot: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<F, Fut, T>>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, PulseServiceError>> + Send + 'static,
    T: Serialize + 'static,
{
    Sse::new(snapshot_events(feed.subscribe(watched), snapshot)).keep_alive(KeepAlive::default())
}

fn snapshot_events<F, Fut, T>(
    subscription: Subscription,
    snapshot: F,
) -> impl Stream<Item = Result<Event, Infallible>> + use<F, Fut, T>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, PulseServiceError>> + Send + 'static,
    T: Serialize + 'static,
{
    stream::unfold(
        (subscription, snapshot, true),
        |(mut subscription, snapshot, first)| async move {
            if !first && !subscription.changed().await {
                return None;
            }
            let event = match snapshot().await {
                Ok(body) => Event::default()
                    .event("snapshot")
                    .json_data(body)
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "snapshot not serializable");
                        Event::default().event("error").data("snapshot unavailable")
                    }),
                Err(e) => {
                    tracing::warn!(error = %e, "snapshot failed");
                    Event::default().event("error").data(e.kind())
                }
            };
            Some((Ok(event), (subscription, snapshot, false)))
        },
    )
}
