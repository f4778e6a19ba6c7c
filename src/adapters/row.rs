//! Row shape of the hosted `workflows` table and its mapping onto catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::models::{
    AutomationCategory, Description, Origin, RecordId, WorkflowFormData, WorkflowRecord,
};

/// Summary shown for user-authored rows that carry no description text.
pub const REMOTE_SUMMARY_FALLBACK: &str = "Custom Workflow";

/// Time-saved label shown for user-authored rows.
pub const REMOTE_TIME_SAVED: &str = "Draft";

/// One row as the store returns it. Every column except `id` and `name`
/// may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRow {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub trigger_event: Option<String>,
    #[serde(default)]
    pub action_chain: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tools: Option<Vec<String>>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub spine_height: Option<i64>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// `text[]` columns may hold nulls; keep the string elements only.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

impl WorkflowRow {
    /// Decode one row of a response body. Rows that cannot be shaped are
    /// logged and skipped.
    pub fn from_value(value: Value) -> Option<Self> {
        let id = value.get("id").cloned();
        match serde_json::from_value(value) {
            Ok(row) => Some(row),
            Err(e) => {
                debug!(row = ?id, error = %e, "Skipping malformed workflow row");
                None
            }
        }
    }

    /// Build the row a write would produce.
    pub fn from_form(id: i64, user_id: &str, form: &WorkflowFormData) -> Self {
        Self {
            id,
            user_id: Some(user_id.to_string()),
            name: form.name.clone(),
            description: form.description.clone(),
            department: form.department.clone(),
            category: form.category.map(|c| c.as_str().to_string()),
            trigger_event: form.trigger_event.clone(),
            action_chain: form.action_chain.clone(),
            tools: form.tools.clone(),
            platform: form.platform.clone(),
            price: form.price,
            is_premium: form.is_premium,
            tags: form.tags.clone(),
            color_theme: form.color_theme.clone(),
            spine_height: form.spine_height.map(i64::from),
            is_public: form.is_public,
            created_at: Some(Utc::now()),
        }
    }

    /// Apply the non-empty fields of `form`, as an update does.
    pub fn apply(&mut self, form: &WorkflowFormData) {
        let updated = Self::from_form(self.id, self.user_id.as_deref().unwrap_or_default(), form);
        self.name = updated.name;
        macro_rules! overwrite {
            ($($field:ident),*) => {
                $(if updated.$field.is_some() { self.$field = updated.$field; })*
            };
        }
        overwrite!(
            description,
            department,
            category,
            trigger_event,
            action_chain,
            tools,
            platform,
            price,
            is_premium,
            tags,
            color_theme,
            spine_height,
            is_public
        );
    }

    /// Shape the row into a catalog record.
    ///
    /// The description is decoded once here. Top-level columns win over the
    /// envelope's `meta` values of the same meaning.
    pub fn into_record(self) -> WorkflowRecord {
        let description = self
            .description
            .as_deref()
            .map(Description::decode)
            .unwrap_or_else(|| Description::Plain(String::new()));

        let mut record =
            WorkflowRecord::new(RecordId::Remote(self.id), self.name, Origin::UserAuthored);
        record.summary = description
            .display_text()
            .map(str::to_string)
            .or_else(|| self.action_chain.clone().filter(|a| !a.trim().is_empty()))
            .unwrap_or_else(|| REMOTE_SUMMARY_FALLBACK.to_string());
        record.time_saved = Some(REMOTE_TIME_SAVED.to_string());

        let meta = match &description {
            Description::Structured(envelope) => {
                record.steps = envelope.steps().to_vec();
                Some(&envelope.meta)
            }
            Description::Plain(_) => None,
        };

        if let Some(department) = self
            .department
            .or_else(|| meta.and_then(|m| m.dept.clone()))
            .filter(|d| !d.trim().is_empty())
        {
            record.department = department;
        }

        let level = self.category.or_else(|| meta.and_then(|m| m.level.clone()));
        if let Some(level) = level {
            match AutomationCategory::from_str(&level) {
                Some(category) => record.category = category,
                None => {
                    debug!(
                        row = self.id,
                        level = %level,
                        "Unknown automation level, using default"
                    );
                }
            }
        }

        record.tools = self
            .tools
            .or_else(|| meta.and_then(|m| m.tools.clone()))
            .unwrap_or_default();
        record.platform = self.platform.filter(|p| !p.trim().is_empty());
        record.price = self.price;
        record.is_premium = self.is_premium.unwrap_or(false);
        record.tags = self.tags.unwrap_or_default();
        record.trigger = self.trigger_event;
        record.owner = self.user_id;
        record.created_at = self.created_at;
        record
    }
}
