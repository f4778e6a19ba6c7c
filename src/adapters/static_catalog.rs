//! Static catalog of pre-defined workflow recipes.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::CatalogError;
use crate::domain::models::{AutomationCategory, Origin, RecordId, WorkflowRecord};

/// Catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../../catalog/flows.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    id: i64,
    #[serde(default)]
    rank: i64,
    name: String,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    category: AutomationCategory,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    time_saved: Option<String>,
    #[serde(default)]
    tip: Option<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    trigger: Option<String>,
    /// Short action summary, e.g. "Extract -> Draft"
    #[serde(default)]
    action: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    is_premium: bool,
    #[serde(default)]
    tier: Option<String>,
}

impl From<CatalogEntry> for WorkflowRecord {
    fn from(entry: CatalogEntry) -> Self {
        let mut record = Self::new(RecordId::Catalog(entry.id), entry.name, Origin::Catalog);
        record.rank = entry.rank;
        record.summary = entry.action;
        record.platform = entry.platform;
        record.category = entry.category;
        if let Some(department) = entry.department {
            record.department = department;
        }
        record.tools = entry.tools;
        record.complexity = entry.complexity;
        record.time_saved = entry.time_saved;
        record.tip = entry.tip;
        record.steps = entry.steps;
        record.trigger = entry.trigger;
        record.tags = entry.tags;
        record.price = entry.price;
        record.is_premium = entry.is_premium;
        record.tier = entry.tier;
        record
    }
}

/// Immutable set of catalog records, parsed once.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Vec<WorkflowRecord>,
}

impl StaticCatalog {
    /// Parse the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::parse(EMBEDDED_CATALOG)
    }

    /// Load the catalog from `path`, or the embedded one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            return Self::embedded();
        };
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::parse(&content)?;
        debug!(path = %path.display(), records = catalog.len(), "Loaded catalog override");
        Ok(catalog)
    }

    /// Parse catalog YAML. Ids must be unique.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_yaml::from_str(yaml)?;
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self {
            records: entries.into_iter().map(WorkflowRecord::from).collect(),
        })
    }

    pub fn records(&self) -> &[WorkflowRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<WorkflowRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
