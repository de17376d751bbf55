//! `yanstore-client`
//!
//! **Responsibility:** talk to the inventory REST backend and feed the
//! in-memory list view.
//!
//! This crate provides:
//! - Client configuration (`ClientConfig::from_env`)
//! - A typed REST client (`ApiClient`) covering instances, products, price
//!   points, categories, sales and the profit-and-loss report
//! - The HTTP-backed `RateSource` for the exchange-rate cache
//! - `InventoryPage`, the controller that loads the collection into a
//!   `ListViewEngine` and runs bulk actions against the backend
//!
//! The backend remains the authority; nothing here persists state.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod page;
pub mod rate_source;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use dto::{
    BulkLocationUpdate, Category, Condition, NewCategory, NewPricePoint, NewProduct, PaymentMethod,
    PricePoint, Product, ProductImage, ProductUpdate, ProfitAndLossRow, SaleRequest,
};
pub use error::{ApiError, ApiResult};
pub use page::InventoryPage;
pub use rate_source::HttpRateSource;
