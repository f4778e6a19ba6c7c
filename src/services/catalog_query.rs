//! Catalog query engine.
//!
//! Pure functions over already-resident records: merge the two sources,
//! keep the records every active filter dimension accepts, and order them.
//! Nothing here performs I/O or fails; missing optional fields read as
//! their documented defaults.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::models::{normalize_platform, FilterState, PriceRange, WorkflowRecord};

/// Concatenate remote records ahead of static ones.
///
/// No deduplication happens: the two sources use disjoint id namespaces.
pub fn merge_sources<'a>(
    static_records: &'a [WorkflowRecord],
    remote_records: &'a [WorkflowRecord],
) -> Vec<&'a WorkflowRecord> {
    remote_records.iter().chain(static_records).collect()
}

/// Keep the records that pass every filter dimension.
///
/// Dimensions combine with AND; the values selected within one dimension
/// combine with OR. An empty selection places no constraint.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a WorkflowRecord>,
    filter: &FilterState,
) -> Vec<&'a WorkflowRecord> {
    let matcher = RecordMatcher::new(filter);
    records.into_iter().filter(|r| matcher.matches(r)).collect()
}

/// Order records: GEM tier first, then user-authored, then ascending rank.
///
/// The sort is stable, so records equal on all three keys keep their
/// merge order.
pub fn sort_records(mut records: Vec<&WorkflowRecord>) -> Vec<&WorkflowRecord> {
    records.sort_by(|a, b| compare_records(a, b));
    records
}

/// Merge, filter and sort in one pass.
pub fn query<'a>(
    static_records: &'a [WorkflowRecord],
    remote_records: &'a [WorkflowRecord],
    filter: &FilterState,
) -> Vec<&'a WorkflowRecord> {
    let merged = merge_sources(static_records, remote_records);
    sort_records(filter_records(merged, filter))
}

/// Catalog ordering used by [`sort_records`].
pub fn compare_records(a: &WorkflowRecord, b: &WorkflowRecord) -> Ordering {
    b.is_gem()
        .cmp(&a.is_gem())
        .then_with(|| b.is_user_authored().cmp(&a.is_user_authored()))
        .then_with(|| a.rank.cmp(&b.rank))
}

/// Filter state prepared once per evaluation.
struct RecordMatcher<'f> {
    filter: &'f FilterState,
    needle: String,
    platforms: BTreeSet<&'f str>,
}

impl<'f> RecordMatcher<'f> {
    fn new(filter: &'f FilterState) -> Self {
        Self {
            filter,
            needle: filter.search.to_lowercase(),
            platforms: filter
                .platforms
                .iter()
                .map(|p| normalize_platform(p))
                .collect(),
        }
    }

    fn matches(&self, record: &WorkflowRecord) -> bool {
        self.matches_search(record)
            && (self.filter.departments.is_empty()
                || self.filter.departments.contains(&record.department))
            && (self.filter.categories.is_empty()
                || self.filter.categories.contains(&record.category))
            && (self.platforms.is_empty() || self.platforms.contains(record.platform_label()))
            && self.matches_price(record)
            && (self.filter.tags.is_empty()
                || record.tags.iter().any(|t| self.filter.tags.contains(t)))
            && (self.filter.tiers.is_empty() || self.filter.tiers.contains(record.tier_label()))
    }

    fn matches_search(&self, record: &WorkflowRecord) -> bool {
        self.needle.is_empty()
            || record.name.to_lowercase().contains(&self.needle)
            || record.summary.to_lowercase().contains(&self.needle)
    }

    fn matches_price(&self, record: &WorkflowRecord) -> bool {
        match self.filter.price {
            PriceRange::Any => true,
            PriceRange::Free => record.is_free(),
            PriceRange::Paid => !record.is_free(),
        }
    }
}
