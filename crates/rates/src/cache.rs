//! Time-boxed, failure-absorbing cache over a `RateSource`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::source::RateSource;
use crate::table::RateTable;

/// Minimum spacing between successful fetches.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Default)]
struct CacheState {
    rates: Option<RateTable>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Process-wide accessor for the USD-relative rate table.
///
/// Refreshes run behind an async mutex, so callers arriving during a refresh
/// wait for it and then read the fresh table.
#[derive(Debug)]
pub struct RateCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl<S> RateCache<S, SystemClock>
where
    S: RateSource,
{
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock, DEFAULT_TTL)
    }
}

impl<S, C> RateCache<S, C>
where
    S: RateSource,
    C: Clock,
{
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Best available rate table. Never fails and never returns an empty table.
    pub async fn get_rates(&self) -> RateTable {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let (Some(rates), Some(fetched_at)) = (&state.rates, state.fetched_at) {
            if self.is_fresh(fetched_at, now) {
                tracing::debug!(%fetched_at, "exchange rates served from cache");
                return rates.clone();
            }
        }

        let fetched = match self.source.fetch_rates().await {
            Ok(payload) => RateTable::from_payload(payload),
            Err(err) => Err(err),
        };

        match fetched {
            Ok(rates) => {
                tracing::info!(currencies = rates.len(), "exchange rates refreshed");
                state.rates = Some(rates.clone());
                state.fetched_at = Some(now);
                rates
            }
            Err(err) => match &state.rates {
                Some(stale) => {
                    tracing::warn!(error = %err, "exchange rate fetch failed; serving last good rates");
                    stale.clone()
                }
                None => {
                    tracing::warn!(error = %err, "exchange rate fetch failed; serving fallback rates");
                    RateTable::fallback()
                }
            },
        }
    }

    /// `usd_amount` in pesos, e.g. `"41.000 COP"`.
    pub async fn convert_to_cop(&self, usd_amount: Option<f64>) -> String {
        self.get_rates().await.convert_to_cop(usd_amount)
    }

    /// Time of the last successful fetch, if any.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.fetched_at
    }

    // A clock that moved backwards counts as fresh.
    fn is_fresh(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(fetched_at).to_std() {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        }
    }
}
