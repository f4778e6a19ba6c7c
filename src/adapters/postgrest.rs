//! Hosted record store speaking the PostgREST dialect.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::adapters::row::WorkflowRow;
use crate::domain::errors::StoreError;
use crate::domain::models::{SessionContext, StoreConfig, WorkflowFormData, WorkflowRecord};
use crate::domain::ports::RecordStore;
use crate::infrastructure::logging::scrub_secret;

/// Record store backed by a `workflows` table behind PostgREST.
pub struct PostgrestRecordStore {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
    timeout_secs: u64,
}

impl PostgrestRecordStore {
    /// Build a store from configuration. Fails when the project URL or the
    /// anon key is missing.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url = config
            .get_url()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| StoreError::NotConfigured("store.url is not set".to_string()))?;
        let anon_key = config
            .get_anon_key()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| StoreError::NotConfigured("store.anon_key is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to create HTTP client: {e}")))?;

        debug!(
            url = %base_url,
            anon_key = %scrub_secret(&anon_key),
            table = %config.table,
            "Record store configured"
        );

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table: config.table.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, method: Method, session: &SessionContext) -> RequestBuilder {
        let bearer = session.access_token.as_deref().unwrap_or(&self.anon_key);
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(self.timeout_secs)
            } else {
                StoreError::Network(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    /// Raw rows of a response body. Rows are shaped one by one by the caller.
    async fn rows(&self, response: Response) -> Result<Vec<Value>, StoreError> {
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Network(e.without_url().to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn require_user(session: &SessionContext) -> Result<&str, StoreError> {
    session.current_user().ok_or(StoreError::NotSignedIn)
}

fn form_body(form: &WorkflowFormData, user_id: Option<&str>) -> Result<Value, StoreError> {
    form.validate().map_err(StoreError::InvalidRecord)?;
    let mut body = serde_json::to_value(form)?;
    if let (Some(user_id), Value::Object(object)) = (user_id, &mut body) {
        object.insert("user_id".to_string(), Value::String(user_id.to_string()));
    }
    Ok(body)
}

#[async_trait]
impl RecordStore for PostgrestRecordStore {
    #[instrument(skip(self, session))]
    async fn list(&self, session: &SessionContext) -> Result<Vec<WorkflowRecord>, StoreError> {
        let request = self
            .request(Method::GET, session)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let rows = self.rows(self.send(request).await?).await?;
        let fetched = rows.len();
        let records: Vec<_> = rows
            .into_iter()
            .filter_map(WorkflowRow::from_value)
            .map(WorkflowRow::into_record)
            .collect();
        debug!(rows = fetched, records = records.len(), "Fetched workflow rows");
        Ok(records)
    }

    #[instrument(skip(self, session, form), fields(name = %form.name))]
    async fn insert(
        &self,
        session: &SessionContext,
        form: &WorkflowFormData,
    ) -> Result<i64, StoreError> {
        let user_id = require_user(session)?;
        let body = form_body(form, Some(user_id))?;
        let request = self
            .request(Method::POST, session)
            .header("Prefer", "return=representation")
            .json(&body);
        let rows = self.rows(self.send(request).await?).await?;
        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))
    }

    #[instrument(skip(self, session, form))]
    async fn update(
        &self,
        session: &SessionContext,
        id: i64,
        form: &WorkflowFormData,
    ) -> Result<(), StoreError> {
        require_user(session)?;
        let body = form_body(form, None)?;
        let request = self
            .request(Method::PATCH, session)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&body);
        let rows = self.rows(self.send(request).await?).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, session))]
    async fn delete(&self, session: &SessionContext, id: i64) -> Result<(), StoreError> {
        require_user(session)?;
        let request = self
            .request(Method::DELETE, session)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");
        let rows = self.rows(self.send(request).await?).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
