//! In-memory document store implementation.

use std::{
    collections::{BTreeMap, HashMap},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, trace};

use crate::{
    Collection, Document, DocumentStore, Fields, Snapshot, StoreError, StoreResult, Subscription,
};

/// Capacity of each collection's change channel.
const CHANNEL_CAPACITY: usize = 64;

type CollectionMap = BTreeMap<String, Document>;

/// In-memory document store for tests and single-process mode.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, CollectionMap>>,
    senders: HashMap<Collection, broadcast::Sender<Snapshot>>,
    offline: AtomicBool,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocumentStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        let collections = Collection::ALL
            .into_iter()
            .map(|c| (c, CollectionMap::new()))
            .collect();
        let senders = Collection::ALL
            .into_iter()
            .map(|c| (c, broadcast::channel(CHANNEL_CAPACITY).0))
            .collect();

        Self {
            collections: RwLock::new(collections),
            senders,
            offline: AtomicBool::new(false),
        }
    }

    /// Simulates an unreachable store. While offline every operation fails
    /// with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }

    fn snapshot(collection: Collection, docs: &CollectionMap) -> Snapshot {
        Snapshot {
            collection,
            documents: docs.values().cloned().collect(),
        }
    }

    fn notify(&self, collection: Collection, docs: &CollectionMap) {
        if let Some(sender) = self.senders.get(&collection) {
            if sender.receiver_count() == 0 {
                return;
            }
            // Ignore send errors (all subscribers gone)
            let _ = sender.send(Self::snapshot(collection, docs));
            trace!(%collection, "Notified subscribers");
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn get_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| Self::snapshot(collection, docs).documents)
            .unwrap_or_default())
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> StoreResult<Document> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        let stored = docs
            .entry(id.to_string())
            .or_insert_with(|| Document::new(id, Fields::new()));
        stored.merge(fields);
        let document = stored.clone();

        debug!(%collection, id, "Upserted document");
        self.notify(collection, docs);
        Ok(document)
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if docs.remove(id).is_none() {
            return Ok(false);
        }

        debug!(%collection, id, "Deleted document");
        self.notify(collection, docs);
        Ok(true)
    }

    async fn subscribe(&self, collection: Collection) -> StoreResult<Subscription> {
        self.ensure_online()?;
        let sender = self
            .senders
            .get(&collection)
            .ok_or_else(|| StoreError::Other(format!("no channel for {collection}")))?;

        // Subscribe under the read lock so no mutation slips between the
        // initial snapshot and the first change event.
        let collections = self.collections.read().await;
        let receiver = sender.subscribe();
        let initial = collections
            .get(&collection)
            .map(|docs| Self::snapshot(collection, docs))
            .unwrap_or(Snapshot {
                collection,
                documents: Vec::new(),
            });

        Ok(Subscription::new(initial, receiver))
    }
}
