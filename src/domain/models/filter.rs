//! Filter state for catalog queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::workflow::AutomationCategory;

/// Price range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    /// No price constraint
    #[default]
    Any,
    /// Only records priced at zero (or unpriced)
    Free,
    /// Only records with a strictly positive price
    Paid,
}

impl PriceRange {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" | "all" => Some(Self::Any),
            "free" => Some(Self::Free),
            "paid" | "premium" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current filter selections.
///
/// Each set left empty places no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub departments: BTreeSet<String>,
    pub categories: BTreeSet<AutomationCategory>,
    pub platforms: BTreeSet<String>,
    pub tiers: BTreeSet<String>,
    pub price: PriceRange,
    pub tags: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.departments.insert(department.into());
        self
    }

    pub fn with_category(mut self, category: AutomationCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.insert(platform.into());
        self
    }

    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tiers.insert(tier.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub const fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    /// Toggle a department on or off, as a sidebar checkbox would.
    pub fn toggle_department(&mut self, department: &str) {
        if !self.departments.remove(department) {
            self.departments.insert(department.to_string());
        }
    }

    /// Toggle a category on or off.
    pub fn toggle_category(&mut self, category: AutomationCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Toggle a platform on or off.
    pub fn toggle_platform(&mut self, platform: &str) {
        if !self.platforms.remove(platform) {
            self.platforms.insert(platform.to_string());
        }
    }

    /// True when no dimension constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.departments.is_empty()
            && self.categories.is_empty()
            && self.platforms.is_empty()
            && self.tiers.is_empty()
            && self.price == PriceRange::Any
            && self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        assert!(FilterState::default().is_unconstrained());
        assert!(!FilterState::new().with_search("x").is_unconstrained());
        assert!(!FilterState::new().with_price(PriceRange::Free).is_unconstrained());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = FilterState::new();
        state.toggle_department("Sales");
        assert!(state.departments.contains("Sales"));
        state.toggle_department("Sales");
        assert!(state.departments.is_empty());

        state.toggle_category(AutomationCategory::Background);
        assert!(state.categories.contains(&AutomationCategory::Background));
        state.toggle_category(AutomationCategory::Background);
        assert!(state.categories.is_empty());

        state.toggle_platform("Zapier");
        state.toggle_platform("Zapier");
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_price_range_parsing() {
        assert_eq!(PriceRange::from_str("FREE"), Some(PriceRange::Free));
        assert_eq!(PriceRange::from_str("paid"), Some(PriceRange::Paid));
        assert_eq!(PriceRange::from_str("any"), Some(PriceRange::Any));
        assert_eq!(PriceRange::from_str("cheap"), None);
    }
}
