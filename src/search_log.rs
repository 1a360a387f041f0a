//! Best-effort search logging.
//!
//! After each recipe search a [`SearchLogRecord`] is written to the
//! `searchlog` collection. The write runs on a spawned task; its outcome is
//! traced and otherwise discarded. There is no retry and no queue.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use kollny_core::models::SearchLogRecord;
use kollny_core::store::{create_record, DocumentStore, SEARCH_LOG_COLLECTION};

/// Fire-and-forget writer for search log records.
///
/// Cloning is cheap; all clones share the same store.
#[derive(Clone, Default)]
pub struct SearchLogger {
    store: Option<Arc<dyn DocumentStore>>,
}

impl SearchLogger {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    /// A logger with no store; every record is dropped.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Dispatch `record` to the store without waiting for it.
    ///
    /// Returns the task handle (if a store is configured) so callers that
    /// care can await completion; the request path ignores it.
    pub fn record(&self, record: SearchLogRecord) -> Option<JoinHandle<()>> {
        let store = self.store.clone()?;
        Some(tokio::spawn(async move {
            write_record(store.as_ref(), &record).await;
        }))
    }
}

/// Write one record, swallowing any error.
pub async fn write_record(store: &dyn DocumentStore, record: &SearchLogRecord) {
    match create_record(store, SEARCH_LOG_COLLECTION, record).await {
        Ok(id) => debug!(%id, results = record.results_count, "search logged"),
        Err(e) => warn!(error = %e, "search log write failed; ignoring"),
    }
}
