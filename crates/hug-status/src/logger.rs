//! Console logging using env_logger
//!
//! The level comes from `RUST_LOG` and defaults to `info`. Lines carry an
//! RFC 3339 timestamp so they can be matched against queue activity.

use env_logger::{Builder, Env, TimestampPrecision};

/// Initialize the global logger
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(Some(TimestampPrecision::Seconds))
        .try_init();
}
