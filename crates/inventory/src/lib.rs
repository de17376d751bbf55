//! Inventory list view module.
//!
//! This crate turns a fetched collection of inventory instances into the rows a
//! list page renders: name/category/location filtering, typed sorting, a fixed
//! page window, and a selection set that survives filter and page changes.
//! Pure in-memory logic (no IO, no HTTP).

pub mod filter;
pub mod instance;
pub mod list_view;
pub mod selection;
pub mod sort;

pub use filter::{CategoryFilter, Filters, LocationFilter};
pub use instance::{InstanceStatus, InventoryInstance, Location, ProductSnapshot};
pub use list_view::{DEFAULT_PAGE_SIZE, ListViewEngine, PageSummary};
pub use selection::Selection;
pub use sort::{SortDirection, SortKey, SortState};
