//! `yanstore-rates`: USD-relative exchange rates with a time-boxed cache.
//!
//! **Responsibility:** hand every caller a usable rate table while touching the
//! network at most once per TTL window.
//!
//! - `RateCache` is constructed once at startup and shared by reference.
//! - The clock and the fetch are injected (`Clock`, `RateSource`), so the
//!   caching policy is deterministic under test.
//! - Fetch failures are absorbed: last good table first, hardcoded table if
//!   nothing was ever fetched.

pub mod cache;
pub mod clock;
pub mod format;
pub mod source;
pub mod table;

pub use cache::{DEFAULT_TTL, RateCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use source::{RateFetchError, RateSource, RatesPayload};
pub use table::RateTable;
