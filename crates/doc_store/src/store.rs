//! Document store trait definitions.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

use crate::{Collection, Document, Fields, Snapshot, StoreResult};

/// Trait for document storage operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Gets a document by ID.
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>>;

    /// Lists every document in a collection.
    async fn get_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    /// Merges fields into a document, creating it if absent.
    ///
    /// Returns the document as stored after the merge.
    async fn upsert(&self, collection: Collection, id: &str, fields: Fields)
        -> StoreResult<Document>;

    /// Deletes a document. Returns false if it did not exist.
    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool>;

    /// Subscribes to changes of a collection.
    ///
    /// The subscription yields the current contents first, then a fresh
    /// snapshot after every mutation.
    async fn subscribe(&self, collection: Collection) -> StoreResult<Subscription>;
}

/// Stream of collection snapshots.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    initial: Option<Snapshot>,
    receiver: broadcast::Receiver<Snapshot>,
}

impl Subscription {
    /// Creates a subscription that yields `initial` before any change.
    pub fn new(initial: Snapshot, receiver: broadcast::Receiver<Snapshot>) -> Self {
        Self {
            initial: Some(initial),
            receiver,
        }
    }

    /// Waits for the next snapshot. Returns `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }

        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                // Every snapshot is complete, so skipped ones carry nothing
                // the next one lacks.
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged behind, skipping stale snapshots");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
