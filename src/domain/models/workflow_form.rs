//! Write-path shape for user-authored workflows.

use serde::{Deserialize, Serialize};

use super::description::{Description, DescriptionMeta, StructuredDescription};
use super::draft::{DraftRequest, DraftResult};
use super::workflow::AutomationCategory;

/// Spine colours used for user-authored workflows on the library shelf.
const SPINE_COLORS: [&str; 3] = [
    "from-blue-900 via-blue-700 to-blue-900",
    "from-indigo-900 via-indigo-700 to-indigo-900",
    "from-slate-900 via-slate-700 to-slate-900",
];

const MIN_SPINE_HEIGHT: u32 = 24;
const MAX_SPINE_HEIGHT: u32 = 32;

/// Fields sent to the record store on insert or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowFormData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AutomationCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spine_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl WorkflowFormData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Turn a generated draft into a row, packing the description envelope
    /// the catalog reads back.
    pub fn from_draft(draft: &DraftResult, request: &DraftRequest) -> Self {
        let name = if draft.title.trim().is_empty() {
            request.intent.clone()
        } else {
            draft.title.clone()
        };
        let color = spine_color(&name);
        let height = spine_height(&name);
        let platform = draft
            .platform
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| request.platform.clone());

        let envelope = Description::Structured(StructuredDescription {
            desc: Some(draft.description.clone()).filter(|d| !d.is_empty()),
            steps: draft.steps.clone(),
            meta: DescriptionMeta {
                dept: Some(request.department.clone()),
                level: Some(request.level.as_str().to_string()),
                tools: Some(request.tools.clone()),
                color: Some(color.to_string()),
                height: Some(height),
                steps: Some(draft.steps.clone()),
            },
        });

        Self {
            name,
            description: Some(envelope.encode()),
            department: Some(request.department.clone()),
            category: Some(request.level),
            trigger_event: request.trigger.clone(),
            action_chain: request.action.clone(),
            tools: Some(request.tools.clone()),
            platform: Some(platform),
            price: Some(0.0),
            is_premium: Some(false),
            tags: None,
            color_theme: Some(color.to_string()),
            spine_height: Some(height),
            is_public: Some(false),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("workflow name cannot be empty".to_string());
        }
        if self.price.is_some_and(|p| !p.is_finite() || p < 0.0) {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(())
    }
}

fn name_hash(name: &str) -> u32 {
    name.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
}

fn spine_color(name: &str) -> &'static str {
    SPINE_COLORS[name_hash(name) as usize % SPINE_COLORS.len()]
}

fn spine_height(name: &str) -> u32 {
    MIN_SPINE_HEIGHT + name_hash(name) % (MAX_SPINE_HEIGHT - MIN_SPINE_HEIGHT + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn draft() -> DraftResult {
        let Value::Object(object) = json!({
            "title": "Invoice Chaser",
            "desc": "Nudges late payers.",
            "steps": ["Check ledger", "Draft reminder"]
        }) else {
            unreachable!()
        };
        DraftResult::from_object(object)
    }

    #[test]
    fn test_from_draft_packs_envelope() {
        let request = DraftRequest::new("Chase invoices", "Finance")
            .with_level(AutomationCategory::Triggered)
            .with_tools(vec!["Gmail".to_string(), "Sheets".to_string()]);
        let form = WorkflowFormData::from_draft(&draft(), &request);

        assert_eq!(form.name, "Invoice Chaser");
        assert_eq!(form.category, Some(AutomationCategory::Triggered));
        let raw = form.description.as_deref().unwrap();
        let Description::Structured(envelope) = Description::decode(raw) else {
            panic!("expected envelope");
        };
        assert_eq!(envelope.desc.as_deref(), Some("Nudges late payers."));
        assert_eq!(envelope.meta.dept.as_deref(), Some("Finance"));
        assert_eq!(envelope.meta.level.as_deref(), Some("triggered"));
        assert_eq!(envelope.steps(), ["Check ledger", "Draft reminder"]);
    }

    #[test]
    fn test_spine_hints_are_stable_and_in_range() {
        for name in ["a", "Invoice Chaser", "Lead Router", ""] {
            let height = spine_height(name);
            assert!((MIN_SPINE_HEIGHT..=MAX_SPINE_HEIGHT).contains(&height));
            assert_eq!(spine_color(name), spine_color(name));
        }
    }

    #[test]
    fn test_validate() {
        assert!(WorkflowFormData::new("Flow").validate().is_ok());
        assert!(WorkflowFormData::new(" ").validate().is_err());
        let mut form = WorkflowFormData::new("Flow");
        form.price = Some(-1.0);
        assert!(form.validate().is_err());
    }
}
