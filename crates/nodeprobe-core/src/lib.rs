//! nodeprobe-core — node client and health checker for nodeprobe.
//!
//! # Overview
//!
//! nodeprobe aggregates the status of an Ethereum-compatible node into a
//! single UP/DOWN health report. The core crate defines:
//!
//! - [`RpcTransport`] — the async trait a JSON-RPC transport implements
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`TransportError`] — structured error type
//! - [`NodeClient`] — the narrow node capability (liveness probe plus five
//!   status queries) the checker depends on
//! - [`NodeHealthChecker`] — probe, fan out, join, report

pub mod error;
pub mod health;
pub mod node;
pub mod request;
pub mod transport;

pub use error::TransportError;
pub use health::{Detail, HealthReport, HealthStatus, NodeHealthChecker};
pub use node::{JsonRpcNodeClient, NodeClient};
pub use request::{decode_quantity, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam};
pub use transport::RpcTransport;
