//! Common test utilities for integration tests
//!
//! Record builders and a test subscriber shared across test files.

#![allow(dead_code)]

use flowshelf::domain::models::{AutomationCategory, Origin, RecordId, WorkflowRecord};

/// Static catalog record with the given rank and tier.
pub fn catalog_record(id: i64, rank: i64, tier: Option<&str>) -> WorkflowRecord {
    let mut record =
        WorkflowRecord::new(RecordId::Catalog(id), format!("Flow {id}"), Origin::Catalog);
    record.rank = rank;
    record.tier = tier.map(str::to_string);
    record
}

/// User-authored record as the store adapters shape it.
pub fn remote_record(id: i64, rank: i64, tier: Option<&str>) -> WorkflowRecord {
    let mut record =
        WorkflowRecord::new(RecordId::Remote(id), format!("Saved {id}"), Origin::UserAuthored);
    record.rank = rank;
    record.tier = tier.map(str::to_string);
    record
}

/// Fully specified record for filter tests.
pub fn record(
    id: i64,
    department: &str,
    category: AutomationCategory,
    tags: &[&str],
    price: Option<f64>,
) -> WorkflowRecord {
    let mut record = catalog_record(id, id, None);
    record.department = department.to_string();
    record.category = category;
    record.tags = tags.iter().map(|t| (*t).to_string()).collect();
    record.price = price;
    record
}

/// Setup test logging
///
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
