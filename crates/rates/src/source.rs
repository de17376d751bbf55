//! Fetch seam for the remote rate table.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

/// Body of `GET /exchange-rates/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatesPayload {
    #[serde(default)]
    pub rates: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RateFetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("exchange rate API error: {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid response format: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RatesPayload, RateFetchError>;
}

#[async_trait]
impl<S> RateSource for Arc<S>
where
    S: RateSource + ?Sized,
{
    async fn fetch_rates(&self) -> Result<RatesPayload, RateFetchError> {
        (**self).fetch_rates().await
    }
}
