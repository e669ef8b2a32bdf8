//! The node client capability: one liveness probe plus five status queries.

use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::decode_quantity;
use crate::transport::RpcTransport;

/// The narrow node interface the health checker depends on.
///
/// Modeled as a trait so the checker can be exercised against a substitute
/// implementation with no network transport behind it.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Liveness probe on the underlying transport (`net_listening`).
    async fn net_listening(&self) -> Result<bool, TransportError>;

    /// Network id the node is attached to (`net_version`).
    async fn net_version(&self) -> Result<String, TransportError>;

    /// Node software version string (`web3_clientVersion`).
    async fn client_version(&self) -> Result<String, TransportError>;

    /// Latest block number (`eth_blockNumber`).
    async fn block_number(&self) -> Result<U256, TransportError>;

    /// Ethereum protocol version (`eth_protocolVersion`).
    async fn protocol_version(&self) -> Result<String, TransportError>;

    /// Number of connected peers (`net_peerCount`).
    async fn peer_count(&self) -> Result<U256, TransportError>;
}

/// `NodeClient` over any JSON-RPC transport.
///
/// Holds no state beyond a monotonically increasing request id, so one
/// client can serve concurrent health checks.
pub struct JsonRpcNodeClient<T: RpcTransport> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcTransport> JsonRpcNodeClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        self.transport.url()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call_string(&self, method: &str) -> Result<String, TransportError> {
        self.transport.call(self.next_id(), method, vec![]).await
    }

    async fn call_quantity(&self, method: &str) -> Result<U256, TransportError> {
        let raw: String = self.transport.call(self.next_id(), method, vec![]).await?;
        decode_quantity(&raw)
    }
}

#[async_trait]
impl<T: RpcTransport> NodeClient for JsonRpcNodeClient<T> {
    async fn net_listening(&self) -> Result<bool, TransportError> {
        self.transport
            .call(self.next_id(), "net_listening", vec![])
            .await
    }

    async fn net_version(&self) -> Result<String, TransportError> {
        self.call_string("net_version").await
    }

    async fn client_version(&self) -> Result<String, TransportError> {
        self.call_string("web3_clientVersion").await
    }

    async fn block_number(&self) -> Result<U256, TransportError> {
        self.call_quantity("eth_blockNumber").await
    }

    async fn protocol_version(&self) -> Result<String, TransportError> {
        self.call_string("eth_protocolVersion").await
    }

    async fn peer_count(&self) -> Result<U256, TransportError> {
        self.call_quantity("net_peerCount").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{JsonRpcRequest, JsonRpcResponse};
    use serde_json::Value;
    use std::sync::Mutex;

    /// Answers each method from a fixed table and records what was called.
    struct TableTransport {
        answers: Vec<(&'static str, Value)>,
        calls: Mutex<Vec<String>>,
    }

    impl TableTransport {
        fn new(answers: Vec<(&'static str, Value)>) -> Self {
            Self {
                answers,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RpcTransport for TableTransport {
        async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
            self.calls.lock().unwrap().push(req.method.clone());
            let result = self
                .answers
                .iter()
                .find(|(m, _)| *m == req.method)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| TransportError::Other(format!("no answer for {}", req.method)))?;
            Ok(JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: req.id,
                result: Some(result),
                error: None,
            })
        }

        fn url(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn dispatches_expected_rpc_methods() {
        let client = JsonRpcNodeClient::new(TableTransport::new(vec![
            ("net_listening", Value::Bool(true)),
            ("net_version", Value::String("1".into())),
            ("web3_clientVersion", Value::String("Geth/v1.13".into())),
            ("eth_blockNumber", Value::String("0x78".into())),
            ("eth_protocolVersion", Value::String("0x41".into())),
            ("net_peerCount", Value::String("0x50".into())),
        ]));

        assert!(client.net_listening().await.unwrap());
        assert_eq!(client.net_version().await.unwrap(), "1");
        assert_eq!(client.client_version().await.unwrap(), "Geth/v1.13");
        assert_eq!(client.block_number().await.unwrap(), U256::from(120u64));
        assert_eq!(client.protocol_version().await.unwrap(), "0x41");
        assert_eq!(client.peer_count().await.unwrap(), U256::from(80u64));

        let calls = client.transport.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "net_listening",
                "net_version",
                "web3_clientVersion",
                "eth_blockNumber",
                "eth_protocolVersion",
                "net_peerCount",
            ]
        );
    }

    #[tokio::test]
    async fn quantity_parse_failure_surfaces_as_error() {
        let client = JsonRpcNodeClient::new(TableTransport::new(vec![(
            "eth_blockNumber",
            Value::String("not-hex".into()),
        )]));
        let err = client.block_number().await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidQuantity(_)));
    }

    #[tokio::test]
    async fn rpc_error_propagates() {
        struct ErrTransport;

        #[async_trait]
        impl RpcTransport for ErrTransport {
            async fn send(
                &self,
                req: JsonRpcRequest,
            ) -> Result<JsonRpcResponse, TransportError> {
                Ok(JsonRpcResponse {
                    jsonrpc: "2.0".into(),
                    id: req.id,
                    result: None,
                    error: Some(crate::request::JsonRpcError {
                        code: -32601,
                        message: "method not found".into(),
                        data: None,
                    }),
                })
            }
            fn url(&self) -> &str {
                "mock"
            }
        }

        let client = JsonRpcNodeClient::new(ErrTransport);
        let err = client.net_version().await.unwrap_err();
        assert!(matches!(err, TransportError::Rpc(_)));
    }

    #[tokio::test]
    async fn request_ids_increase() {
        let transport = TableTransport::new(vec![("net_version", Value::String("1".into()))]);
        let client = JsonRpcNodeClient::new(transport);
        assert_eq!(client.next_id(), 1);
        assert_eq!(client.next_id(), 2);
    }
}
