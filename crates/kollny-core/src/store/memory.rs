//! In-memory [`DocumentStore`] implementation for tests and embedded use.
//!
//! Documents live in a `BTreeMap` keyed by collection behind a
//! `std::sync::RwLock`, so collection listing is already sorted.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::{stamp_timestamps, DocumentStore};

/// A stored document and the ID it was assigned.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

pub struct InMemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl InMemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Snapshot of the documents in `collection`, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.collections
            .read()
            .map(|c| c.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_document(&self, collection: &str, document: &Value) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let body = stamp_timestamps(document, chrono::Utc::now());
        let mut collections = self
            .collections
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                body,
            });
        Ok(id)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(collections.keys().cloned().collect())
    }
}
