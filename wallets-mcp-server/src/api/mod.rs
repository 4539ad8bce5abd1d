//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `POST   /mcp` – MCP JSON-RPC over streamable HTTP (stateless, authenticated)
//! - `GET    /mcp` – 405, no server-initiated streams in stateless mode
//! - `DELETE /mcp` – 405, there are no sessions to terminate

pub mod extractors;
pub mod mcp;
