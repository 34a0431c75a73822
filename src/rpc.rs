//! JSON-RPC transport plumbing: the `Transport` seam, its HTTP implementation,
//! authentication, metrics, and client options.

pub mod auth;
pub mod client;
pub mod metrics;
pub mod options;

pub use client::{parse_client_name, HttpTransport, RpcError, Transport};
pub use metrics::RpcMetricsSnapshot;
pub use options::RpcClientOptions;
