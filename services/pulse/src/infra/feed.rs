//! In-process change notifications for store collections.
//!
//! Every repository write publishes the collection it touched. Watchers
//! re-read their snapshot on each notification, so a lagged receiver only
//! means "something changed" and is reported as such.

use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    TaskFields,
    DailyLogs,
    Tasks,
    Announcements,
    Resources,
    VisitorLogs,
    AppConfig,
}

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Collection>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, collection: Collection) {
        // No subscribers is not an error.
        let _ = self.tx.send(collection);
    }

    /// Watch a set of collections. Dropping the subscription unsubscribes.
    pub fn subscribe(&self, watched: &[Collection]) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            watched: watched.to_vec(),
        }
    }
}

pub struct Subscription {
    rx: broadcast::Receiver<Collection>,
    watched: Vec<Collection>,
}

impl Subscription {
    /// Wait for the next change to any watched collection.
    ///
    /// Returns `false` once the feed is closed.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.rx.recv().await {
                Ok(collection) if self.watched.contains(&collection) => return true,
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "change feed lagged, treating as changed");
                    return true;
                }
                Err(RecvError::Closed) => return false,
            }
        }
    }
}
