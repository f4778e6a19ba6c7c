//! Catalog query behaviour over the embedded catalog and the service snapshot.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{catalog_record, remote_record};
use flowshelf::adapters::{InMemoryRecordStore, StaticCatalog, WorkflowRow};
use flowshelf::domain::models::{
    AutomationCategory, FilterState, PriceRange, RecordId, SessionContext, WorkflowFormData,
};
use flowshelf::services::catalog_query::{query, sort_records};
use flowshelf::services::{CatalogService, RefreshOutcome};

fn ids(records: &[&flowshelf::WorkflowRecord]) -> Vec<RecordId> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn test_gem_then_remote_then_rank() {
    let static_records = vec![
        catalog_record(1, 5, Some("Standard")),
        catalog_record(2, 1, Some("GEM")),
    ];
    let remote_records = vec![remote_record(9, 0, Some("Standard"))];

    let ordered = query(&static_records, &remote_records, &FilterState::default());
    assert_eq!(
        ids(&ordered),
        vec![RecordId::Catalog(2), RecordId::Remote(9), RecordId::Catalog(1)]
    );
}

#[test]
fn test_search_matches_name_or_summary() {
    let mut record = catalog_record(7, 7, None);
    record.name = "Invoice Chaser".to_string();
    record.summary = "Check -> Draft".to_string();
    let records = vec![record];

    let hits = query(&records, &[], &FilterState::new().with_search("invoice"));
    assert_eq!(ids(&hits), vec![RecordId::Catalog(7)]);

    let hits = query(&records, &[], &FilterState::new().with_search("check -> d"));
    assert_eq!(hits.len(), 1);

    assert!(query(&records, &[], &FilterState::new().with_search("zzz-none")).is_empty());
}

#[test]
fn test_embedded_catalog_leads_with_gems() {
    let catalog = StaticCatalog::embedded().unwrap();
    let ordered = query(catalog.records(), &[], &FilterState::default());

    assert_eq!(catalog.len(), 55);
    assert_eq!(ordered.len(), catalog.len());
    let gem_count = catalog.records().iter().filter(|r| r.is_gem()).count();
    assert!(gem_count > 0);
    assert!(ordered[..gem_count].iter().all(|r| r.is_gem()));
    assert!(ordered[gem_count..].iter().all(|r| !r.is_gem()));

    // Within the non-GEM block, rank never decreases.
    let ranks: Vec<i64> = ordered[gem_count..].iter().map(|r| r.rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_embedded_catalog_filters() {
    let catalog = StaticCatalog::embedded().unwrap();

    let finance = FilterState::new().with_department("Finance");
    let hits = query(catalog.records(), &[], &finance);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|r| r.department == "Finance"));
    assert!(hits.iter().any(|r| r.name == "Invoice Chaser"));

    let triggered_finance = finance.clone().with_category(AutomationCategory::Triggered);
    let hits = query(catalog.records(), &[], &triggered_finance);
    assert!(hits
        .iter()
        .all(|r| r.department == "Finance" && r.category == AutomationCategory::Triggered));

    let zapier = FilterState::new().with_platform("Zapier");
    let hits = query(catalog.records(), &[], &zapier);
    assert_eq!(
        ids(&hits),
        vec![
            RecordId::Catalog(102),
            RecordId::Catalog(103),
            RecordId::Catalog(109),
            RecordId::Catalog(111)
        ]
    );

    let legacy = FilterState::new().with_platform("Google Workspace Studio");
    let hits = query(catalog.records(), &[], &legacy);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|r| r.platform_label() == "Google Workspace"));

    let gems = FilterState::new().with_tier("GEM");
    assert_eq!(query(catalog.records(), &[], &gems).len(), 4);

    let tagged = FilterState::new().with_tag("slack");
    assert!(query(catalog.records(), &[], &tagged)
        .iter()
        .all(|r| r.tags.iter().any(|t| t == "slack")));

    // Nothing in the embedded catalog carries a price.
    let paid = FilterState::new().with_price(PriceRange::Paid);
    assert!(query(catalog.records(), &[], &paid).is_empty());
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let records = vec![
        catalog_record(10, 3, None),
        catalog_record(11, 3, None),
        catalog_record(12, 3, None),
    ];
    let sorted = sort_records(records.iter().collect());
    assert_eq!(
        ids(&sorted),
        vec![RecordId::Catalog(10), RecordId::Catalog(11), RecordId::Catalog(12)]
    );
}

#[tokio::test]
async fn test_service_merges_saved_workflows() {
    let session = SessionContext::signed_in("u-1");
    let mut form = WorkflowFormData::new("Lead Digest");
    form.department = Some("Sales".to_string());
    form.tags = Some(vec!["digest".to_string()]);
    let store = Arc::new(InMemoryRecordStore::with_rows(vec![WorkflowRow::from_form(
        1, "u-1", &form,
    )]));

    let catalog = StaticCatalog::embedded().unwrap();
    let static_len = catalog.len();
    let service = CatalogService::new(
        catalog.into_records(),
        store,
        session,
        Duration::from_secs(5),
    );

    assert_eq!(
        service.refresh().await.unwrap(),
        RefreshOutcome::Applied { records: 1 }
    );

    let all = service.query(&FilterState::default()).await;
    assert_eq!(all.len(), static_len + 1);

    // User-authored records sort after GEMs but ahead of every other static record.
    let first_non_gem = all.iter().find(|r| !r.is_gem()).unwrap();
    assert_eq!(first_non_gem.id, RecordId::Remote(1));

    let digest = service.query(&FilterState::new().with_tag("digest")).await;
    assert_eq!(digest.len(), 1);
    assert_eq!(digest[0].name, "Lead Digest");

    let found = service.find(&RecordId::Remote(1)).await.unwrap();
    assert!(found.is_user_authored());
}
