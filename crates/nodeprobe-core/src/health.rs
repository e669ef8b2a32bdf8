//! Node health checker: one liveness probe, then five concurrent status
//! queries joined all-or-nothing into a single UP/DOWN report.

use std::collections::BTreeMap;
use std::time::Duration;

use alloy_primitives::U256;
use futures::future::{self, BoxFuture, FutureExt};
use serde::Serialize;

use crate::error::TransportError;
use crate::node::NodeClient;

/// Fixed detail keys of the health report.
pub const DETAIL_NET_VERSION: &str = "netVersion";
pub const DETAIL_CLIENT_VERSION: &str = "clientVersion";
pub const DETAIL_BLOCK_NUMBER: &str = "blockNumber";
pub const DETAIL_PROTOCOL_VERSION: &str = "protocolVersion";
pub const DETAIL_PEER_COUNT: &str = "netPeerCount";
pub const DETAIL_ERROR: &str = "error";

/// Overall node health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// One diagnostic value in the report.
///
/// Quantities keep their full `U256` width and render as decimal strings,
/// so a report survives block numbers past any fixed integer width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Text(String),
    Quantity(U256),
}

impl Serialize for Detail {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Quantity(q) => serializer.serialize_str(&q.to_string()),
        }
    }
}

impl From<String> for Detail {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<U256> for Detail {
    fn from(q: U256) -> Self {
        Self::Quantity(q)
    }
}

/// The outcome of one health check. Built fresh per invocation and
/// immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub details: BTreeMap<&'static str, Detail>,
}

impl HealthReport {
    fn up(details: BTreeMap<&'static str, Detail>) -> Self {
        Self {
            status: HealthStatus::Up,
            details,
        }
    }

    fn down() -> Self {
        Self {
            status: HealthStatus::Down,
            details: BTreeMap::new(),
        }
    }

    fn down_with_error(err: &TransportError) -> Self {
        let mut details = BTreeMap::new();
        details.insert(DETAIL_ERROR, Detail::Text(err.to_string()));
        Self {
            status: HealthStatus::Down,
            details,
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

/// Aggregates node status into a [`HealthReport`].
///
/// One check is a two-phase sequence: the `net_listening` probe gates
/// everything; if it passes, the five status queries are dispatched
/// concurrently and joined. Any failure anywhere collapses to DOWN with an
/// `error` detail — the checker itself never fails and never retries.
pub struct NodeHealthChecker<C: NodeClient> {
    client: C,
    join_timeout: Option<Duration>,
}

impl<C: NodeClient> NodeHealthChecker<C> {
    /// Checker with the baseline unbounded join.
    pub fn new(client: C) -> Self {
        Self {
            client,
            join_timeout: None,
        }
    }

    /// Bound the wait on the five status queries. A timeout becomes a DOWN
    /// report, not a stuck check.
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = Some(timeout);
        self
    }

    /// Run one health check. Infallible: every fault is encoded into the
    /// report rather than returned.
    pub async fn check(&self) -> HealthReport {
        match self.client.net_listening().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("node transport is not listening");
                return HealthReport::down();
            }
            Err(e) => {
                tracing::warn!(error = %e, "listening probe failed");
                return HealthReport::down_with_error(&e);
            }
        }

        match self.query_details().await {
            Ok(details) => HealthReport::up(details),
            Err(e) => {
                tracing::warn!(error = %e, "node status query failed");
                HealthReport::down_with_error(&e)
            }
        }
    }

    /// Fan out the five status queries and collect them by fixed key, so the
    /// result is independent of completion order. The first failure wins and
    /// discards everything else (all-or-nothing UP).
    async fn query_details(
        &self,
    ) -> Result<BTreeMap<&'static str, Detail>, TransportError> {
        let client = &self.client;
        let queries: Vec<BoxFuture<'_, Result<(&'static str, Detail), TransportError>>> = vec![
            async move { Ok((DETAIL_NET_VERSION, client.net_version().await?.into())) }.boxed(),
            async move { Ok((DETAIL_CLIENT_VERSION, client.client_version().await?.into())) }
                .boxed(),
            async move { Ok((DETAIL_BLOCK_NUMBER, client.block_number().await?.into())) }.boxed(),
            async move {
                Ok((DETAIL_PROTOCOL_VERSION, client.protocol_version().await?.into()))
            }
            .boxed(),
            async move { Ok((DETAIL_PEER_COUNT, client.peer_count().await?.into())) }.boxed(),
        ];

        let join = future::try_join_all(queries);
        let pairs = match self.join_timeout {
            Some(timeout) => tokio::time::timeout(timeout, join)
                .await
                .map_err(|_| TransportError::Timeout {
                    ms: timeout.as_millis() as u64,
                })??,
            None => join.await?,
        };

        Ok(pairs.into_iter().collect())
    }
}
