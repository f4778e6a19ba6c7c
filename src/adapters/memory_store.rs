//! In-memory record store used by demo mode and tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::adapters::row::WorkflowRow;
use crate::domain::errors::StoreError;
use crate::domain::models::{SessionContext, WorkflowFormData, WorkflowRecord};
use crate::domain::ports::RecordStore;

/// Keeps rows in process memory. Rows go through the same shaping as
/// rows fetched from the hosted store.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    rows: RwLock<Vec<WorkflowRow>>,
    next_id: AtomicI64,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed the store with existing rows.
    pub fn with_rows(rows: Vec<WorkflowRow>) -> Self {
        let next = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, _session: &SessionContext) -> Result<Vec<WorkflowRecord>, StoreError> {
        let rows = self.rows.read().await;
        // Newest first, like the hosted store's `order=created_at.desc`.
        Ok(rows.iter().rev().cloned().map(WorkflowRow::into_record).collect())
    }

    async fn insert(
        &self,
        session: &SessionContext,
        form: &WorkflowFormData,
    ) -> Result<i64, StoreError> {
        let user_id = session.current_user().ok_or(StoreError::NotSignedIn)?;
        form.validate().map_err(StoreError::InvalidRecord)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows
            .write()
            .await
            .push(WorkflowRow::from_form(id, user_id, form));
        Ok(id)
    }

    async fn update(
        &self,
        session: &SessionContext,
        id: i64,
        form: &WorkflowFormData,
    ) -> Result<(), StoreError> {
        session.current_user().ok_or(StoreError::NotSignedIn)?;
        form.validate().map_err(StoreError::InvalidRecord)?;

        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        row.apply(form);
        Ok(())
    }

    async fn delete(&self, session: &SessionContext, id: i64) -> Result<(), StoreError> {
        session.current_user().ok_or(StoreError::NotSignedIn)?;

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
