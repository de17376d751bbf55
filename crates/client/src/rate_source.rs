//! `RateSource` backed by the REST backend.

use async_trait::async_trait;

use yanstore_rates::{RateFetchError, RateSource, RatesPayload};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct HttpRateSource {
    api: ApiClient,
}

impl HttpRateSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> Result<RatesPayload, RateFetchError> {
        self.api.get_exchange_rates().await.map_err(|err| match err {
            ApiError::Network(msg) => RateFetchError::Network(msg),
            ApiError::Api { status, .. } => RateFetchError::Status(status),
            ApiError::Decode(msg) => RateFetchError::Decode(msg),
            ApiError::Invalid(err) => RateFetchError::Malformed(err.to_string()),
        })
    }
}
