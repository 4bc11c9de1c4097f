//! MCP (Model Context Protocol) client support.
//!
//! Byline's agents lean on external MCP tool servers (hosted search/crawl,
//! workspace documents). This module implements just enough of the
//! JSON-RPC 2.0 client side to perform initialize/tools-list handshakes
//! for health checking; the servers themselves are opaque.

mod client;
mod health;
mod protocol;

pub use client::{HttpServerClient, StdioServerClient};
pub use health::{
    format_health_report, recommendations, run_all_health_checks, HealthCheck, HealthStatus,
};
pub use protocol::{ServerToolInfo, PROTOCOL_VERSION};
