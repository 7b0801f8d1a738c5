//! In-memory dataset sessions.
//!
//! Each upload becomes an immutable [`Dataset`] under a fresh id. Nothing is
//! persisted; the store is bounded and evicts its oldest dataset when full.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DashboardError;
use crate::filter::FilterDomain;
use crate::models::{IngestStats, Record};
use crate::sanitize::CleanTable;

// ---

/// A sanitized upload and everything derived from it at ingest time.
#[derive(Debug)]
pub struct Dataset {
    // ---
    pub id: Uuid,
    pub records: Vec<Record>,
    pub stats: IngestStats,
    pub domain: FilterDomain,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    datasets: HashMap<Uuid, Arc<Dataset>>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

/// Shared handle to the session map; cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionStore {
    // ---
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl SessionStore {
    // ---
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    /// Register a clean table as a new dataset.
    pub fn insert(&self, table: CleanTable) -> Arc<Dataset> {
        // ---
        let dataset = Arc::new(Dataset {
            id: Uuid::new_v4(),
            domain: FilterDomain::from_records(&table.records),
            records: table.records,
            stats: table.stats,
            created_at: Utc::now(),
        });

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        while inner.datasets.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.datasets.remove(&oldest);
            tracing::info!("Evicted dataset {} to stay within {} sessions", oldest, self.capacity);
        }
        inner.datasets.insert(dataset.id, Arc::clone(&dataset));
        inner.order.push_back(dataset.id);

        tracing::debug!("Stored dataset {} ({} sessions active)", dataset.id, inner.datasets.len());
        dataset
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Dataset>, DashboardError> {
        // ---
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .datasets
            .get(&id)
            .cloned()
            .ok_or(DashboardError::NotFound(id))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), DashboardError> {
        // ---
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.datasets.remove(&id).ok_or(DashboardError::NotFound(id))?;
        inner.order.retain(|existing| *existing != id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .datasets
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::sanitize::load_clean_table;

    fn table() -> CleanTable {
        // ---
        load_clean_table(
            b"Date,Platform,Sentiment,Location,Engagements,Media Type\n\
              2025-01-06,X,positive,A,100,video\n",
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        // ---
        let store = SessionStore::new(4);
        let dataset = store.insert(table());

        let fetched = store.get(dataset.id).unwrap();
        assert_eq!(fetched.records.len(), 1);
        assert_eq!(fetched.domain.platforms, vec!["X"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        // ---
        let store = SessionStore::new(4);
        assert!(matches!(store.get(Uuid::nil()), Err(DashboardError::NotFound(_))));
        assert!(matches!(store.remove(Uuid::nil()), Err(DashboardError::NotFound(_))));
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        // ---
        let store = SessionStore::new(2);
        let first = store.insert(table());
        let second = store.insert(table());
        let third = store.insert(table());

        assert_eq!(store.len(), 2);
        assert!(store.get(first.id).is_err());
        assert!(store.get(second.id).is_ok());
        assert!(store.get(third.id).is_ok());
    }

    #[test]
    fn test_remove_frees_slot() {
        // ---
        let store = SessionStore::new(2);
        let first = store.insert(table());
        let second = store.insert(table());

        store.remove(first.id).unwrap();
        let third = store.insert(table());

        assert!(store.get(second.id).is_ok());
        assert!(store.get(third.id).is_ok());
        assert!(!store.is_empty());
    }
}
