//! Headless inventory snapshot: load the collection, apply filters from the
//! environment, and print the first page with peso conversions.

use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;

use yanstore_client::{ApiClient, ClientConfig, HttpRateSource, InventoryPage};
use yanstore_inventory::SortKey;
use yanstore_rates::{RateCache, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yanstore_observability::init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, page_size = config.page_size, "starting inventory snapshot");

    let api = ApiClient::new(&config).context("failed to build API client")?;
    let rates = RateCache::with_clock(HttpRateSource::new(api.clone()), SystemClock, config.rates_ttl);
    let mut page = InventoryPage::new(api, &config);

    page.reload().await.context("failed to load inventory")?;
    if let Err(err) = page.load_categories().await {
        tracing::warn!(error = %err, "categories unavailable; category names omitted");
    }

    let engine = page.engine_mut();
    if let Ok(query) = std::env::var("YANSTORE_NAME_QUERY") {
        engine.set_name_query(query);
    }
    if let Ok(category) = std::env::var("YANSTORE_CATEGORY") {
        engine.set_category_filter(&category);
    }
    if let Ok(location) = std::env::var("YANSTORE_LOCATION") {
        engine.set_location_filter(&location);
    }
    // Two clicks: ascending by SKU.
    engine.set_sort(SortKey::Sku);
    engine.set_sort(SortKey::Sku);

    let table = rates.get_rates().await;
    let engine = page.engine();
    let summary = engine.summary();

    println!(
        "{} products found (page {}/{})",
        summary.displayed_count, summary.current_page, summary.total_pages
    );
    for instance in engine.page_instances() {
        let cost = instance.base_cost.to_f64();
        println!(
            "{:<12} {:<40} {:<10} {:>10} USD  {}",
            instance.product.sku,
            instance.product.name,
            instance.location,
            instance.base_cost.to_string(),
            table.convert_to_cop(cost),
        );
    }

    Ok(())
}
