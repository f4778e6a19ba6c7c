//! Draft generation boundary types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::workflow::{AutomationCategory, CANONICAL_WORKSPACE_PLATFORM};

/// Parameters a user picks in the studio before asking for a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Free-text description of what the workflow should do.
    pub intent: String,
    pub department: String,
    pub level: AutomationCategory,
    /// Selected integration tools, in selection order.
    pub tools: Vec<String>,
    /// Target platform label.
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl DraftRequest {
    pub fn new(intent: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            department: department.into(),
            level: AutomationCategory::default(),
            tools: Vec::new(),
            platform: CANONICAL_WORKSPACE_PLATFORM.to_string(),
            trigger: None,
            action: None,
        }
    }

    /// Build a request from the studio's "when <trigger>, then <action>" fields.
    pub fn from_studio(
        trigger: impl Into<String>,
        action: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        let trigger = trigger.into();
        let action = action.into();
        let intent = format!("When '{}' occurs, then '{}'", trigger.trim(), action.trim());
        Self {
            trigger: Some(trigger),
            action: Some(action),
            ..Self::new(intent, department)
        }
    }

    pub const fn with_level(mut self, level: AutomationCategory) -> Self {
        self.level = level;
        self
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Reject requests that cannot produce a meaningful prompt.
    pub fn validate(&self) -> Result<(), String> {
        if self.intent.trim().is_empty() {
            return Err("intent cannot be empty".to_string());
        }
        if self.department.trim().is_empty() {
            return Err("department cannot be empty".to_string());
        }
        let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&self.trigger) || blank(&self.action) {
            return Err("trigger and action must both be filled in".to_string());
        }
        Ok(())
    }
}

/// Structured draft returned by the generative API.
///
/// Only "is a JSON object" is enforced; missing fields read as empty and
/// the full object stays available in `raw`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftResult {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_prompt: Option<String>,
    #[serde(skip)]
    pub raw: Value,
}

impl DraftResult {
    /// Read a draft leniently out of a parsed JSON object.
    pub fn from_object(object: Map<String, Value>) -> Self {
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| object.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        };

        let steps = match object.get("steps") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(single)) => vec![single.clone()],
            _ => Vec::new(),
        };

        Self {
            title: text(&["title", "name"]).unwrap_or_default(),
            description: text(&["description", "desc"]).unwrap_or_default(),
            steps,
            platform: text(&["platform"]),
            implementation_prompt: text(&["implementationPrompt", "implementation_prompt"]),
            raw: Value::Object(object),
        }
    }
}
