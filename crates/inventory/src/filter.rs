//! Narrowing filters applied to the loaded collection.
//!
//! Passes run in a fixed order (name, category, location) and each keeps the
//! relative order of the previous result.

use crate::instance::InventoryInstance;

/// Sentinel the UI uses for "no restriction".
pub const ALL: &str = "all";

/// Category dropdown value: `"all"` or a category id rendered as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(v) => v,
        }
    }

    /// Unknown values simply match nothing.
    pub fn matches(&self, instance: &InventoryInstance) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(v) => instance.product.category_id.to_string() == *v,
        }
    }
}

/// Location dropdown value: `"all"` or an exact location string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl LocationFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            LocationFilter::All
        } else {
            LocationFilter::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationFilter::All => ALL,
            LocationFilter::Only(v) => v,
        }
    }

    pub fn matches(&self, instance: &InventoryInstance) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Only(v) => instance.location.as_str() == v,
        }
    }
}

/// Active filter state of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    name_query: String,
    // Lowercased copy of `name_query`, kept in sync by `set_name_query`.
    needle: String,
    pub category: CategoryFilter,
    pub location: LocationFilter,
}

impl Filters {
    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        self.name_query = query.into();
        self.needle = self.name_query.to_lowercase();
    }

    /// Case-insensitive substring match on the product name.
    pub fn matches_name(&self, instance: &InventoryInstance) -> bool {
        self.needle.is_empty() || instance.product.name.to_lowercase().contains(&self.needle)
    }

    pub fn matches(&self, instance: &InventoryInstance) -> bool {
        self.matches_name(instance) && self.category.matches(instance) && self.location.matches(instance)
    }

    /// Indices into `instances` that survive every pass, in original order.
    pub fn apply(&self, instances: &[InventoryInstance]) -> Vec<usize> {
        instances
            .iter()
            .enumerate()
            .filter(|(_, i)| self.matches_name(i))
            .filter(|(_, i)| self.category.matches(i))
            .filter(|(_, i)| self.location.matches(i))
            .map(|(idx, _)| idx)
            .collect()
    }
}
