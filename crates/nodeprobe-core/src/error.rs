//! Transport-level error types.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors that can occur while querying a node.
///
/// The health checker never surfaces these to its caller; they are folded
/// into a DOWN report with an `error` detail.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, bad status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request or join timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A quantity field was not valid `0x`-prefixed hex.
    #[error("Invalid hex quantity: {0}")]
    InvalidQuantity(String),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}
