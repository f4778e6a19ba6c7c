//! Workflow catalog domain model.
//!
//! A `WorkflowRecord` is one catalog entry describing an automation recipe.
//! Records come from two sources: the static catalog shipped with the binary
//! and the user-authored rows held by the remote record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Tier label that sorts ahead of every other tier.
pub const GEM_TIER: &str = "GEM";

/// Tier assumed for records that carry none.
pub const DEFAULT_TIER: &str = "Standard";

/// Department assumed for user-authored records that carry none.
pub const DEFAULT_DEPARTMENT: &str = "General";

/// Canonical platform label for Google Workspace flows.
pub const CANONICAL_WORKSPACE_PLATFORM: &str = "Google Workspace";

/// Earlier spelling of the workspace platform, still present on old rows.
pub const LEGACY_WORKSPACE_PLATFORM: &str = "Google Workspace Studio";

/// Prefix used when rendering remote record identifiers.
const REMOTE_ID_PREFIX: &str = "db-";

/// Identifier of a catalog entry.
///
/// Static and remote records live in disjoint namespaces, so two records
/// from different sources can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    /// Entry of the static catalog (small integers).
    Catalog(i64),
    /// Row of the remote record store, rendered as `db-<id>`.
    Remote(i64),
}

impl RecordId {
    /// Row id in the remote store, if this is a remote record.
    pub const fn remote_row(&self) -> Option<i64> {
        match self {
            Self::Remote(id) => Some(*id),
            Self::Catalog(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(id) => write!(f, "{id}"),
            Self::Remote(id) => write!(f, "{REMOTE_ID_PREFIX}{id}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(row) = s.strip_prefix(REMOTE_ID_PREFIX) {
            return row
                .parse()
                .map(Self::Remote)
                .map_err(|_| format!("invalid remote record id: {s}"));
        }
        s.parse()
            .map(Self::Catalog)
            .map_err(|_| format!("invalid record id: {s} (expected a number or db-<number>)"))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Catalog(id) => serializer.serialize_i64(*id),
            Self::Remote(_) => serializer.collect_str(self),
        }
    }
}

/// How a workflow runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AutomationCategory {
    /// Human-in-the-loop: a person reviews before the flow acts
    #[default]
    #[serde(alias = "HITL")]
    Hitl,
    /// Event-triggered
    Triggered,
    /// Fully automatic background job
    Background,
}

impl AutomationCategory {
    /// All categories, in the order the filter sidebar lists them.
    pub const ALL: [Self; 3] = [Self::Hitl, Self::Triggered, Self::Background];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hitl => "hitl",
            Self::Triggered => "triggered",
            Self::Background => "background",
        }
    }

    /// Human readable label used in prompts and tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hitl => "Human in the Loop",
            Self::Triggered => "Event Triggered",
            Self::Background => "Background",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hitl" | "human-in-the-loop" | "human_in_the_loop" => Some(Self::Hitl),
            "triggered" | "event" | "event-triggered" => Some(Self::Triggered),
            "background" | "auto" => Some(Self::Background),
            _ => None,
        }
    }
}

impl fmt::Display for AutomationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Shipped with the static catalog
    Catalog,
    /// Authored by a user and stored remotely
    UserAuthored,
}

/// Map the legacy workspace platform spelling onto the canonical label.
pub fn normalize_platform(label: &str) -> &str {
    if label == LEGACY_WORKSPACE_PLATFORM {
        CANONICAL_WORKSPACE_PLATFORM
    } else {
        label
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRecord {
    pub id: RecordId,
    pub name: String,
    /// Action summary, e.g. "Extract -> Draft"; searched alongside the name.
    pub summary: String,
    pub department: String,
    pub category: AutomationCategory,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub tags: Vec<String>,
    pub steps: Vec<String>,
    /// Lower sorts first.
    pub rank: i64,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkflowRecord {
    /// Minimal record; every optional attribute left at its default.
    pub fn new(id: RecordId, name: impl Into<String>, origin: Origin) -> Self {
        Self {
            id,
            name: name.into(),
            summary: String::new(),
            department: DEFAULT_DEPARTMENT.to_string(),
            category: AutomationCategory::default(),
            tools: Vec::new(),
            platform: None,
            price: None,
            is_premium: false,
            tier: None,
            tags: Vec::new(),
            steps: Vec::new(),
            rank: 0,
            origin,
            trigger: None,
            complexity: None,
            time_saved: None,
            tip: None,
            owner: None,
            created_at: None,
        }
    }

    /// Price in USD; missing, negative and NaN prices all read as free.
    pub fn effective_price(&self) -> f64 {
        self.price.filter(|p| *p > 0.0).unwrap_or(0.0)
    }

    pub fn is_free(&self) -> bool {
        self.effective_price() == 0.0
    }

    /// Tier label, `Standard` when absent.
    pub fn tier_label(&self) -> &str {
        self.tier.as_deref().unwrap_or(DEFAULT_TIER)
    }

    pub fn is_gem(&self) -> bool {
        self.tier_label() == GEM_TIER
    }

    /// Platform label after legacy normalization.
    pub fn platform_label(&self) -> &str {
        normalize_platform(self.platform.as_deref().unwrap_or(LEGACY_WORKSPACE_PLATFORM))
    }

    pub const fn is_user_authored(&self) -> bool {
        matches!(self.origin, Origin::UserAuthored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display_and_parse() {
        assert_eq!(RecordId::Catalog(7).to_string(), "7");
        assert_eq!(RecordId::Remote(9).to_string(), "db-9");
        assert_eq!("7".parse::<RecordId>(), Ok(RecordId::Catalog(7)));
        assert_eq!("db-9".parse::<RecordId>(), Ok(RecordId::Remote(9)));
        assert!("db-x".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_record_id_serializes_by_namespace() {
        assert_eq!(serde_json::to_value(RecordId::Catalog(3)).unwrap(), serde_json::json!(3));
        assert_eq!(
            serde_json::to_value(RecordId::Remote(3)).unwrap(),
            serde_json::json!("db-3")
        );
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(AutomationCategory::from_str("HITL"), Some(AutomationCategory::Hitl));
        assert_eq!(
            AutomationCategory::from_str(" triggered "),
            Some(AutomationCategory::Triggered)
        );
        assert_eq!(
            AutomationCategory::from_str("background"),
            Some(AutomationCategory::Background)
        );
        assert_eq!(AutomationCategory::from_str("Agent"), None);
        assert_eq!(AutomationCategory::default(), AutomationCategory::Hitl);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let record = WorkflowRecord::new(RecordId::Catalog(1), "Flow", Origin::Catalog);
        assert_eq!(record.tier_label(), "Standard");
        assert_eq!(record.platform_label(), "Google Workspace");
        assert!(record.is_free());
        assert!(!record.is_gem());
    }

    #[test]
    fn test_effective_price_degrades_bad_values() {
        let mut record = WorkflowRecord::new(RecordId::Catalog(1), "Flow", Origin::Catalog);
        record.price = Some(-4.0);
        assert!(record.is_free());
        record.price = Some(f64::NAN);
        assert!(record.is_free());
        record.price = Some(19.0);
        assert!(!record.is_free());
        assert!((record.effective_price() - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_platform_normalization() {
        assert_eq!(normalize_platform("Google Workspace Studio"), "Google Workspace");
        assert_eq!(normalize_platform("Zapier"), "Zapier");
    }
}
