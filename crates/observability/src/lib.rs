//! Logging setup shared by every binary of the inventory client.

pub mod logging;

pub use logging::{LogFormat, LogSettings};

/// Install the process-wide subscriber described by the environment.
///
/// Safe to call multiple times; only the first call installs anything.
pub fn init() {
    logging::init_with(&LogSettings::from_env());
}
