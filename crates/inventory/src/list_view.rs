//! List view engine: filter, sort, paginate, and select over a loaded collection.
//!
//! The engine owns the fetched collection and derives two orderings from it:
//! the *displayed* set (filtered, fetch order) and the *ordered* set (the
//! displayed set under the current sort). Pagination and "select all on page"
//! both read from the ordered set. No operation here can fail; bad input
//! yields an empty page or a no-op.

use std::collections::HashMap;

use serde::Serialize;
use yanstore_core::{DomainError, DomainResult, InstanceId};

use crate::filter::{CategoryFilter, Filters, LocationFilter};
use crate::instance::{InventoryInstance, Location};
use crate::selection::Selection;
use crate::sort::{SortKey, SortState};

/// Rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 90;

/// Snapshot of the counters a list page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub displayed_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_len: usize,
    pub selected_count: usize,
    pub all_on_page_selected: bool,
}

#[derive(Debug, Clone)]
pub struct ListViewEngine {
    all: Vec<InventoryInstance>,
    index: HashMap<InstanceId, usize>,
    filters: Filters,
    sort: SortState,
    selection: Selection,
    current_page: usize,
    page_size: usize,
    displayed: Vec<usize>,
    ordered: Vec<usize>,
}

impl Default for ListViewEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ListViewEngine {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A page size of zero is treated as one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            index: HashMap::new(),
            filters: Filters::default(),
            sort: SortState::default(),
            selection: Selection::new(),
            current_page: 1,
            page_size: page_size.max(1),
            displayed: Vec::new(),
            ordered: Vec::new(),
        }
    }

    /// Replace the collection wholesale (fetch order is preserved).
    ///
    /// Filters are re-applied, the page resets to 1, and selected ids that are
    /// no longer present are dropped.
    pub fn set_all_instances(&mut self, instances: Vec<InventoryInstance>) {
        self.index = instances
            .iter()
            .enumerate()
            .map(|(pos, i)| (i.instance_id, pos))
            .collect();
        self.all = instances;

        let pruned = self.selection.retain_present(&self.index);
        tracing::debug!(
            loaded = self.all.len(),
            pruned_selection = pruned,
            "list view collection replaced"
        );

        self.refilter();
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        self.filters.set_name_query(query);
        self.refilter();
    }

    pub fn set_category_filter(&mut self, value: &str) {
        self.filters.category = CategoryFilter::parse(value);
        self.refilter();
    }

    pub fn set_location_filter(&mut self, value: &str) {
        self.filters.location = LocationFilter::parse(value);
        self.refilter();
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Filtered rows in fetch order (before sorting and paging).
    pub fn displayed_instances(&self) -> Vec<&InventoryInstance> {
        self.displayed.iter().map(|&i| &self.all[i]).collect()
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    /// Rows of the current page window; empty when the page is out of range.
    pub fn page_instances(&self) -> Vec<&InventoryInstance> {
        self.page_window()
            .iter()
            .map(|&i| &self.all[i])
            .collect()
    }

    /// Header click on `key`.
    ///
    /// Sorting never changes membership, so the page is kept.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.reorder();
    }

    /// Header click by label; returns `false` (and does nothing) for unknown labels.
    pub fn set_sort_label(&mut self, label: &str) -> bool {
        match SortKey::from_label(label) {
            Some(key) => {
                self.set_sort(key);
                true
            }
            None => {
                tracing::debug!(label, "ignoring unknown sort label");
                false
            }
        }
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Not clamped: an out-of-range page renders empty.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(displayed / page_size)`, at least 1.
    pub fn total_pages(&self) -> usize {
        self.displayed.len().div_ceil(self.page_size).max(1)
    }

    /// Ids outside the loaded collection are ignored.
    pub fn toggle_select(&mut self, id: InstanceId) {
        if !self.index.contains_key(&id) {
            tracing::debug!(%id, "ignoring selection of unknown instance");
            return;
        }
        self.selection.toggle(id);
    }

    /// Deselect the page when it is fully selected, otherwise select all of it.
    pub fn toggle_select_all_on_page(&mut self) {
        let ids = self.page_ids();
        if ids.is_empty() {
            return;
        }
        if self.selection.contains_all(&ids) {
            self.selection.remove_all(&ids);
        } else {
            self.selection.insert_all(ids);
        }
    }

    pub fn is_all_on_page_selected(&self) -> bool {
        let ids = self.page_ids();
        !ids.is_empty() && self.selection.contains_all(&ids)
    }

    pub fn is_selected(&self, id: InstanceId) -> bool {
        self.selection.contains(id)
    }

    /// Snapshot of the selected ids.
    pub fn selected_ids(&self) -> Vec<InstanceId> {
        self.selection.ids()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected records in fetch order.
    pub fn selected_instances(&self) -> Vec<&InventoryInstance> {
        self.all
            .iter()
            .filter(|i| self.selection.contains(i.instance_id))
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn all_instances(&self) -> &[InventoryInstance] {
        &self.all
    }

    /// Look up a loaded instance by id, regardless of filters.
    pub fn instance(&self, id: InstanceId) -> DomainResult<&InventoryInstance> {
        self.index
            .get(&id)
            .map(|&pos| &self.all[pos])
            .ok_or_else(|| DomainError::not_found(format!("instance {id}")))
    }

    /// Distinct locations in the loaded collection, first-seen order.
    pub fn location_options(&self) -> Vec<Location> {
        let mut seen: Vec<Location> = Vec::new();
        for instance in &self.all {
            if !seen.contains(&instance.location) {
                seen.push(instance.location.clone());
            }
        }
        seen
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            displayed_count: self.displayed_count(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            page_len: self.page_window().len(),
            selected_count: self.selected_count(),
            all_on_page_selected: self.is_all_on_page_selected(),
        }
    }

    fn refilter(&mut self) {
        self.displayed = self.filters.apply(&self.all);
        self.current_page = 1;
        self.reorder();
    }

    fn reorder(&mut self) {
        let mut ordered = self.displayed.clone();
        self.sort.sort_indices(&self.all, &mut ordered);
        self.ordered = ordered;
    }

    fn page_window(&self) -> &[usize] {
        let Some(zero_based) = self.current_page.checked_sub(1) else {
            return &[];
        };
        let start = zero_based.saturating_mul(self.page_size);
        if start >= self.ordered.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(self.ordered.len());
        &self.ordered[start..end]
    }

    fn page_ids(&self) -> Vec<InstanceId> {
        self.page_window()
            .iter()
            .map(|&i| self.all[i].instance_id)
            .collect()
    }
}
