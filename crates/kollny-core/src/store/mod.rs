//! Persistence collaborator abstraction.
//!
//! The [`DocumentStore`] trait is the only contract the service has with its
//! database: create a document in a named collection, and (for diagnostics)
//! list the collections that exist. Backends are pluggable (SQLite in the
//! server crate, [`memory::InMemoryStore`] here).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Collection that receives one [`SearchLogRecord`](crate::models::SearchLogRecord)
/// per recipe search.
pub const SEARCH_LOG_COLLECTION: &str = "searchlog";

/// Abstract document database.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`name`](DocumentStore::name) | Display name of the database |
/// | [`create_document`](DocumentStore::create_document) | Insert a document, returning its id |
/// | [`list_collections`](DocumentStore::list_collections) | Names of non-empty collections |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Display name of the underlying database.
    fn name(&self) -> &str;

    /// Insert `document` into `collection`.
    ///
    /// Implementations stamp `created_at` and `updated_at` on the stored
    /// copy. Returns the new document ID.
    async fn create_document(&self, collection: &str, document: &Value) -> Result<String>;

    /// Names of the collections holding at least one document, sorted.
    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Serialize `record` and insert it via [`DocumentStore::create_document`].
pub async fn create_record<T: Serialize + ?Sized>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> Result<String> {
    let document = serde_json::to_value(record)?;
    store.create_document(collection, &document).await
}

/// Copy `document` and add `created_at` / `updated_at` (RFC 3339) when it is
/// a JSON object. Non-object documents are stored as given.
pub fn stamp_timestamps(document: &Value, now: chrono::DateTime<chrono::Utc>) -> Value {
    let mut stamped = document.clone();
    if let Value::Object(map) = &mut stamped {
        let ts = Value::String(now.to_rfc3339());
        map.insert("created_at".to_string(), ts.clone());
        map.insert("updated_at".to_string(), ts);
    }
    stamped
}
