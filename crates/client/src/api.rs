//! Typed REST client for the inventory backend.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use yanstore_core::{CategoryId, ProductId};
use yanstore_inventory::InventoryInstance;
use yanstore_rates::RatesPayload;

use crate::config::ClientConfig;
use crate::dto::{
    BulkLocationUpdate, Category, NewCategory, NewPricePoint, NewProduct, PricePoint, Product,
    ProductUpdate, ProfitAndLossRow, SaleRequest,
};
use crate::error::{ApiError, ApiResult, error_detail};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
}

impl ApiClient {
    /// Build a client whose requests give up after `config.request_timeout`.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `GET /instances/`
    pub async fn get_instances(&self) -> ApiResult<Vec<InventoryInstance>> {
        self.send_json(self.request(Method::GET, "/instances/")).await
    }

    /// `GET /products/`
    pub async fn get_products(&self) -> ApiResult<Vec<Product>> {
        self.send_json(self.request(Method::GET, "/products/")).await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, product_id: ProductId) -> ApiResult<Product> {
        let endpoint = format!("/products/{product_id}");
        self.send_json(self.request(Method::GET, &endpoint)).await
    }

    /// `POST /products/` as a multipart form, with the image as a file part.
    pub async fn create_product(&self, product: &NewProduct) -> ApiResult<Product> {
        product.validate()?;
        let mut form = Form::new();
        for (name, value) in product.form_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = &product.image {
            form = form.part(
                "image",
                Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
            );
        }
        self.send_json(self.request(Method::POST, "/products/").multipart(form))
            .await
    }

    /// `PATCH /products/{id}`
    pub async fn update_product(
        &self,
        product_id: ProductId,
        update: &ProductUpdate,
    ) -> ApiResult<Product> {
        let endpoint = format!("/products/{product_id}");
        self.send_json(self.json_request(Method::PATCH, &endpoint, update))
            .await
    }

    /// `POST /price-points/`
    pub async fn create_price_point(&self, price: &NewPricePoint) -> ApiResult<PricePoint> {
        price.validate()?;
        self.send_json(self.json_request(Method::POST, "/price-points/", price))
            .await
    }

    /// `GET /categories/`
    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.send_json(self.request(Method::GET, "/categories/")).await
    }

    /// `POST /categories/`
    pub async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        category.validate()?;
        self.send_json(self.json_request(Method::POST, "/categories/", category))
            .await
    }

    /// `DELETE /categories/{id}`
    pub async fn delete_category(&self, category_id: CategoryId) -> ApiResult<()> {
        let endpoint = format!("/categories/{category_id}");
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }

    /// `GET /profit-and-loss/`
    pub async fn get_profit_and_loss(&self) -> ApiResult<Vec<ProfitAndLossRow>> {
        self.send_json(self.request(Method::GET, "/profit-and-loss/")).await
    }

    /// `GET /exchange-rates/`
    pub async fn get_exchange_rates(&self) -> ApiResult<RatesPayload> {
        self.send_json(self.request(Method::GET, "/exchange-rates/")).await
    }

    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, product_id: ProductId) -> ApiResult<()> {
        let endpoint = format!("/products/{product_id}");
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }

    /// `PATCH /instances/bulk-location`
    pub async fn update_locations(&self, update: &BulkLocationUpdate) -> ApiResult<()> {
        self.send(self.json_request(Method::PATCH, "/instances/bulk-location", update))
            .await?;
        Ok(())
    }

    /// `POST /sales/`
    pub async fn register_sale(&self, sale: &SaleRequest) -> ApiResult<serde_json::Value> {
        self.send_json(self.json_request(Method::POST, "/sales/", sale)).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, endpoint);
        tracing::debug!(%method, %url, "API request");
        self.http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> RequestBuilder {
        self.request(method, endpoint).json(body)
    }

    async fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = error_detail(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), %detail, "API error");
        Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
