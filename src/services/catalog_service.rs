//! Catalog service: owns the static catalog and the remote snapshot.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::StoreError;
use crate::domain::models::{FilterState, RecordId, SessionContext, WorkflowRecord};
use crate::domain::ports::RecordStore;
use crate::services::catalog_query;

/// Result of a refresh that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched records replaced the snapshot.
    Applied { records: usize },
    /// A newer refresh was issued while this one was in flight.
    Superseded,
}

/// Distinct values present in the catalog, used as filter options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub departments: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    pub tiers: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct Snapshot {
    records: Vec<WorkflowRecord>,
    ticket: u64,
}

/// Serves catalog queries over the static records plus the latest remote snapshot.
pub struct CatalogService {
    static_records: Vec<WorkflowRecord>,
    store: Arc<dyn RecordStore>,
    session: SessionContext,
    refresh_timeout: Duration,
    snapshot: RwLock<Snapshot>,
    issued: AtomicU64,
}

impl CatalogService {
    pub fn new(
        static_records: Vec<WorkflowRecord>,
        store: Arc<dyn RecordStore>,
        session: SessionContext,
        refresh_timeout: Duration,
    ) -> Self {
        Self {
            static_records,
            store,
            session,
            refresh_timeout,
            snapshot: RwLock::new(Snapshot::default()),
            issued: AtomicU64::new(0),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Fetch the remote records and replace the snapshot.
    ///
    /// Only the most recently issued refresh may apply its result. On
    /// failure the previous snapshot stays in place.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome, StoreError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, "Refreshing remote snapshot");

        let fetched = tokio::time::timeout(self.refresh_timeout, self.store.list(&self.session))
            .await
            .map_err(|_| StoreError::Timeout(self.refresh_timeout.as_secs()))
            .and_then(|result| result);

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                warn!(ticket, error = %e, "Refresh failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let mut snapshot = self.snapshot.write().await;
        if ticket != self.issued.load(Ordering::SeqCst) {
            debug!(ticket, "Discarding superseded refresh");
            return Ok(RefreshOutcome::Superseded);
        }
        let count = records.len();
        snapshot.records = records;
        snapshot.ticket = ticket;
        info!(ticket, records = count, "Remote snapshot replaced");
        Ok(RefreshOutcome::Applied { records: count })
    }

    /// Merge, filter and order the catalog.
    pub async fn query(&self, filter: &FilterState) -> Vec<WorkflowRecord> {
        let snapshot = self.snapshot.read().await;
        catalog_query::query(&self.static_records, &snapshot.records, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn find(&self, id: &RecordId) -> Option<WorkflowRecord> {
        let snapshot = self.snapshot.read().await;
        catalog_query::merge_sources(&self.static_records, &snapshot.records)
            .into_iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    pub async fn remote_count(&self) -> usize {
        self.snapshot.read().await.records.len()
    }

    /// Distinct departments, platforms, tiers and tags across both sources.
    pub async fn facets(&self) -> Facets {
        let snapshot = self.snapshot.read().await;
        let mut facets = Facets::default();
        for record in catalog_query::merge_sources(&self.static_records, &snapshot.records) {
            facets.departments.insert(record.department.clone());
            facets.platforms.insert(record.platform_label().to_string());
            facets.tiers.insert(record.tier_label().to_string());
            facets.tags.extend(record.tags.iter().cloned());
        }
        facets
    }
}
