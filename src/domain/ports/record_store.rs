use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::models::{SessionContext, WorkflowFormData, WorkflowRecord};

/// Port for the hosted store of user-authored workflows.
///
/// Reads return records already shaped for the catalog (`Origin::UserAuthored`,
/// `RecordId::Remote`). Writes take the acting session explicitly and fail
/// with [`StoreError::NotSignedIn`] when no one is signed in.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every user-authored workflow, newest first
    async fn list(&self, session: &SessionContext) -> Result<Vec<WorkflowRecord>, StoreError>;

    /// Insert a workflow owned by the session's user, returning the assigned row id
    async fn insert(
        &self,
        session: &SessionContext,
        form: &WorkflowFormData,
    ) -> Result<i64, StoreError>;

    /// Replace the fields of an existing row
    async fn update(
        &self,
        session: &SessionContext,
        id: i64,
        form: &WorkflowFormData,
    ) -> Result<(), StoreError>;

    /// Delete a row
    async fn delete(&self, session: &SessionContext, id: i64) -> Result<(), StoreError>;
}
