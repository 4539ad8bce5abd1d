//! Shared types for the Bitcoin wallets MCP server.
//!
//! - [`objects`] holds the simplified wallet data model returned by tools and
//!   the MCP wire types.
//! - [`config`] holds the validated Blink connection settings.
//! - `client` (feature `client`) is the GraphQL transport used to reach Blink.
//! - `mock` (feature `mock`) is an in-process fake of the Blink endpoint for tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod objects;
