//! Externally supplied connection properties.
//!
//! The node endpoint is configuration, not code: a deployment hands the
//! probe an address (and optionally a timeout) and gets back a ready
//! client handle.

use std::time::Duration;

use serde::Deserialize;

use nodeprobe_core::error::TransportError;
use nodeprobe_core::node::JsonRpcNodeClient;

use crate::client::{HttpClientConfig, HttpRpcClient};

/// Endpoint used when no client address is configured (a node on the
/// standard local JSON-RPC port).
pub const DEFAULT_CLIENT_ADDRESS: &str = "http://localhost:8545";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection properties for the node client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeProperties {
    /// HTTP(S) URL of the node's JSON-RPC endpoint. Empty means the default
    /// local endpoint.
    pub client_address: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NodeProperties {
    fn default() -> Self {
        Self {
            client_address: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NodeProperties {
    /// The address these properties resolve to.
    pub fn resolved_address(&self) -> &str {
        if self.client_address.is_empty() {
            DEFAULT_CLIENT_ADDRESS
        } else {
            &self.client_address
        }
    }

    /// Build a node client for the configured endpoint.
    pub fn connect(&self) -> Result<JsonRpcNodeClient<HttpRpcClient>, TransportError> {
        let config = HttpClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        };
        tracing::info!(url = %self.resolved_address(), "connecting node client");
        let transport = HttpRpcClient::new(self.resolved_address(), config)?;
        Ok(JsonRpcNodeClient::new(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_resolves_to_default() {
        let props = NodeProperties::default();
        assert_eq!(props.resolved_address(), DEFAULT_CLIENT_ADDRESS);
    }

    #[test]
    fn explicit_address_wins() {
        let props = NodeProperties {
            client_address: "https://localhost:12345".into(),
            ..NodeProperties::default()
        };
        assert_eq!(props.resolved_address(), "https://localhost:12345");
    }

    #[test]
    fn deserializes_with_defaults() {
        let props: NodeProperties = serde_json::from_str("{}").unwrap();
        assert_eq!(props.client_address, "");
        assert_eq!(props.request_timeout_secs, 30);

        let props: NodeProperties =
            serde_json::from_str(r#"{"client_address": "http://10.0.0.5:8545"}"#).unwrap();
        assert_eq!(props.resolved_address(), "http://10.0.0.5:8545");
    }

    #[test]
    fn connect_builds_a_client_for_the_resolved_address() {
        let client = NodeProperties::default().connect().unwrap();
        assert_eq!(client.url(), DEFAULT_CLIENT_ADDRESS);
    }
}
