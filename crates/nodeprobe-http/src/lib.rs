//! nodeprobe-http — HTTP JSON-RPC transport for nodeprobe.
//!
//! # Features
//! - Single-shot `reqwest` transport (no retries — the probe contract)
//! - Connection properties resolving an address into a ready node client

pub mod client;
pub mod config;

pub use client::{HttpClientConfig, HttpRpcClient};
pub use config::{NodeProperties, DEFAULT_CLIENT_ADDRESS};
