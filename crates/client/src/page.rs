//! Inventory page controller.
//!
//! Owns the `ListViewEngine` for one page and the loading step that feeds it.
//! A failed load is reported through `last_error` and leaves the engine as it
//! was; bulk actions run against the backend and then reload.

use chrono::Utc;
use rust_decimal::Decimal;

use yanstore_core::{InstanceId, ProductId};
use yanstore_inventory::{ListViewEngine, Location};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::dto::{BulkLocationUpdate, Category, PaymentMethod, SaleRequest};
use crate::error::{ApiError, ApiResult};

#[derive(Debug)]
pub struct InventoryPage {
    api: ApiClient,
    engine: ListViewEngine,
    categories: Vec<Category>,
    last_error: Option<String>,
}

impl InventoryPage {
    pub fn new(api: ApiClient, config: &ClientConfig) -> Self {
        Self {
            api,
            engine: ListViewEngine::with_page_size(config.page_size),
            categories: Vec::new(),
            last_error: None,
        }
    }

    pub fn engine(&self) -> &ListViewEngine {
        &self.engine
    }

    /// Filter/sort/page/selection mutators live on the engine.
    pub fn engine_mut(&mut self) -> &mut ListViewEngine {
        &mut self.engine
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Message of the most recent failed backend call, cleared on the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the collection and hand it to the engine.
    pub async fn reload(&mut self) -> ApiResult<usize> {
        let result = self.api.get_instances().await;
        let instances = self.record(result)?;
        let count = instances.len();
        self.engine.set_all_instances(instances);
        tracing::info!(count, "inventory loaded");
        Ok(count)
    }

    pub async fn load_categories(&mut self) -> ApiResult<usize> {
        let result = self.api.get_categories().await;
        self.categories = self.record(result)?;
        Ok(self.categories.len())
    }

    /// Category filter choices as `(value, label)`, starting with `("all", "All")`.
    pub fn category_options(&self) -> Vec<(String, String)> {
        std::iter::once(("all".to_string(), "All".to_string()))
            .chain(
                self.categories
                    .iter()
                    .map(|c| (c.category_id.to_string(), c.category_name.clone())),
            )
            .collect()
    }

    /// Location filter choices as `(value, label)`, starting with `("all", "All")`.
    pub fn location_options(&self) -> Vec<(String, String)> {
        std::iter::once(("all".to_string(), "All".to_string()))
            .chain(self.engine.location_options().into_iter().map(|l| {
                let value = l.to_string();
                (value.clone(), value)
            }))
            .collect()
    }

    pub async fn delete_product(&mut self, product_id: ProductId) -> ApiResult<usize> {
        let result = self.api.delete_product(product_id).await;
        self.record(result)?;
        tracing::info!(%product_id, "product deleted");
        self.reload().await
    }

    /// Move every selected instance to `location`; the selection is cleared on success.
    ///
    /// Returns how many instances were moved. An empty selection is a no-op.
    pub async fn move_selected(&mut self, location: Location) -> ApiResult<usize> {
        let instance_ids: Vec<InstanceId> = self.engine.selected_ids();
        if instance_ids.is_empty() {
            return Ok(0);
        }
        let moved = instance_ids.len();
        let update = BulkLocationUpdate {
            instance_ids,
            location,
        };

        let result = self.api.update_locations(&update).await;
        self.record(result)?;
        tracing::info!(moved, location = %update.location, "instances moved");

        self.engine.clear_selection();
        self.reload().await?;
        Ok(moved)
    }

    pub async fn register_sale(&mut self, sale: &SaleRequest) -> ApiResult<serde_json::Value> {
        let result = match sale.validate() {
            Ok(()) => self.api.register_sale(sale).await,
            Err(err) => Err(ApiError::from(err)),
        };
        let receipt = self.record(result)?;
        tracing::info!(product_id = %sale.product_id, "sale registered");
        self.reload().await?;
        Ok(receipt)
    }

    /// Sell a loaded instance now. An id that is not loaded fails with
    /// `DomainError::NotFound` and nothing is sent.
    pub async fn sell_instance(
        &mut self,
        instance_id: InstanceId,
        sale_price: Decimal,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> ApiResult<serde_json::Value> {
        let lookup = self.engine.instance(instance_id).map(|i| i.product_id);
        let product_id = match lookup {
            Ok(id) => id,
            Err(err) => return self.record(Err(err.into())),
        };
        let sale = SaleRequest {
            product_id,
            sale_price,
            sale_date: Utc::now(),
            payment_method,
            notes,
        };
        self.register_sale(&sale).await
    }

    fn record<T>(&mut self, result: ApiResult<T>) -> ApiResult<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(err) => {
                tracing::error!(error = %err, "backend call failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
