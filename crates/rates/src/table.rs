use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::format_es_co;
use crate::source::{RateFetchError, RatesPayload};

/// Used until a fetch has ever succeeded.
const FALLBACK_RATES: &[(&str, f64)] = &[
    ("COP", 4000.0),
    ("EUR", 0.92),
    ("GBP", 0.78),
    ("JPY", 110.0),
    ("CAD", 1.35),
    ("AUD", 1.45),
];

/// Currency code -> units per one USD. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    pub fn fallback() -> Self {
        Self(
            FALLBACK_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        )
    }

    /// Validate a fetched payload.
    ///
    /// Non-positive and non-finite rates are dropped; a payload with no
    /// usable rate at all is rejected.
    pub fn from_payload(payload: RatesPayload) -> Result<Self, RateFetchError> {
        let raw = payload
            .rates
            .ok_or_else(|| RateFetchError::Malformed("missing `rates`".to_string()))?;

        let total = raw.len();
        let rates: BTreeMap<String, f64> = raw
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .map(|(code, rate)| (code.trim().to_uppercase(), rate))
            .collect();

        if rates.is_empty() {
            return Err(RateFetchError::Malformed("`rates` has no usable entries".to_string()));
        }
        if rates.len() < total {
            tracing::warn!(dropped = total - rates.len(), "ignoring invalid exchange rates");
        }
        Ok(Self(rates))
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn cop(&self) -> Option<f64> {
        self.get("COP")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// `"<amount> COP"`, or `"0 COP"` when the amount or the COP rate is unusable.
    pub fn convert_to_cop(&self, usd_amount: Option<f64>) -> String {
        let (Some(amount), Some(rate)) = (usd_amount, self.cop()) else {
            return "0 COP".to_string();
        };
        if !amount.is_finite() || amount == 0.0 {
            return "0 COP".to_string();
        }
        format!("{} COP", format_es_co(amount * rate))
    }
}
