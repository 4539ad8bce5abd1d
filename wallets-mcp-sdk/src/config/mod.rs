//! Configuration types for the upstream wallet providers.
//!
//! These are validated values. Reading them from the environment is the
//! server crate's job.

mod blink;

pub use blink::{BLINK_API_KEY_PREFIX, BlinkConfig, BlinkConfigError, DEFAULT_BLINK_ENDPOINT};
