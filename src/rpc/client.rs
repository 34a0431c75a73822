//! Transport abstraction consumed by the eth namespace and its HTTP
//! implementation on top of `jsonrpsee`. Houses the `Transport` trait,
//! `HttpTransport`, and the transport-level `RpcError`.

use crate::eth::methods::WEB3_CLIENT_VERSION;
use crate::rpc::auth::build_auth_headers;
use crate::rpc::metrics::{CallOutcome, RpcMetrics, RpcMetricsSnapshot};
use crate::rpc::options::RpcClientOptions;
use crate::runtime::config::ClientConfig;
use anyhow::{anyhow, Context, Result};
use futures::future::BoxFuture;
use jsonrpsee::core::{
    client::{ClientT, Error as JsonRpcError},
    http_helpers::HttpError,
    params::ArrayParams,
};
use jsonrpsee::http_client::transport::Error as HttpTransportError;
use jsonrpsee::http_client::{HeaderMap, HttpClient, HttpClientBuilder};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum RpcError {
    Timeout { method: &'static str },
    Cancelled { method: &'static str },
    ResponseTooLarge { method: &'static str },
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcError::Timeout { method } => write!(f, "rpc method {method} timed out"),
            RpcError::Cancelled { method } => write!(f, "rpc method {method} was cancelled"),
            RpcError::ResponseTooLarge { method } => {
                write!(f, "rpc {method} response exceeded HTTP size limits")
            }
        }
    }
}

impl std::error::Error for RpcError {}

/// Performs one remote procedure call per invocation.
///
/// Implementations must stop waiting and fail promptly once `cancel` fires.
/// A JSON `null` result is returned as [`Value::Null`], not as an error.
pub trait Transport: Send + Sync {
    fn call<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        method: &'static str,
        params: Vec<Value>,
    ) -> BoxFuture<'a, Result<Value>>;

    /// Lowercase name of the node software (`geth`, `bor`, `erigon`, ...).
    fn node_client<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<String>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    rpc_url: Arc<String>,
    client: HttpClient,
    options: RpcClientOptions,
    metrics: Arc<RpcMetrics>,
    node_client: Arc<OnceCell<String>>,
}

impl Transport for HttpTransport {
    fn call<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        method: &'static str,
        params: Vec<Value>,
    ) -> BoxFuture<'a, Result<Value>> {
        Box::pin(self.request(cancel, method, params))
    }

    fn node_client<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.fetch_node_client(cancel))
    }
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_options(url, RpcClientOptions::default())
    }

    pub fn with_options(url: impl Into<String>, options: RpcClientOptions) -> Result<Self> {
        Self::build(url.into(), HeaderMap::new(), options)
    }

    pub fn with_basic_auth(
        url: impl Into<String>,
        user: &str,
        password: &str,
        options: RpcClientOptions,
    ) -> Result<Self> {
        let headers = build_auth_headers(user, password)?;
        Self::build(url.into(), headers, options)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let options = config.rpc_options();
        match config.credentials() {
            Some((user, password)) => {
                Self::with_basic_auth(config.rpc_url(), user, password, options)
            }
            None => Self::with_options(config.rpc_url(), options),
        }
    }

    fn build(rpc_url: String, headers: HeaderMap, options: RpcClientOptions) -> Result<Self> {
        options.validate()?;

        let max_request_body_size = options.max_request_body_bytes.min(u32::MAX as usize) as u32;
        let max_response_body_size = options.max_response_body_bytes.min(u32::MAX as usize) as u32;

        let client = HttpClientBuilder::default()
            .set_headers(headers)
            .request_timeout(options.request_timeout)
            .max_concurrent_requests(options.max_concurrent_requests)
            .max_request_size(max_request_body_size)
            .max_response_size(max_response_body_size)
            .build(&rpc_url)
            .map_err(|err| anyhow!("failed to build RPC client: {err}"))?;

        Ok(Self {
            rpc_url: Arc::new(rpc_url),
            client,
            options,
            metrics: Arc::new(RpcMetrics::default()),
            node_client: Arc::new(OnceCell::new()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.rpc_url
    }

    pub fn metrics(&self) -> RpcMetricsSnapshot {
        self.metrics.snapshot()
    }

    async fn request(
        &self,
        cancel: &CancellationToken,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<Value> {
        let mut rpc_params = ArrayParams::new();
        for param in params {
            rpc_params
                .insert(param)
                .with_context(|| format!("failed to serialize {method} params"))?;
        }

        let start = Instant::now();
        let outcome: Result<Value> = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RpcError::Cancelled { method }.into()),
            response = timeout(
                self.options.request_timeout,
                self.client.request::<Value, _>(method, rpc_params),
            ) => match response {
                Ok(result) => result.map_err(|err| map_rpc_error(method, err)),
                Err(_) => Err(RpcError::Timeout { method }.into()),
            },
        };
        let elapsed = start.elapsed();

        self.metrics.record(CallOutcome::of(&outcome), elapsed);
        match &outcome {
            Ok(_) => tracing::debug!(
                method,
                elapsed_ms = elapsed.as_millis() as u64,
                "rpc call completed"
            ),
            Err(err) => tracing::debug!(
                method,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %err,
                "rpc call failed"
            ),
        }

        outcome
    }

    async fn fetch_node_client(&self, cancel: &CancellationToken) -> Result<String> {
        let name = self
            .node_client
            .get_or_try_init(|| async {
                let version = self.request(cancel, WEB3_CLIENT_VERSION, Vec::new()).await?;
                let version = version
                    .as_str()
                    .ok_or_else(|| anyhow!("{WEB3_CLIENT_VERSION} returned a non-string result"))?;
                let name = parse_client_name(version);
                tracing::debug!(client = %name, version, "resolved node client");
                Ok::<_, anyhow::Error>(name)
            })
            .await?;
        Ok(name.clone())
    }
}

/// Extracts the implementation name from a `web3_clientVersion` string such
/// as `Geth/v1.13.5-stable/linux-amd64/go1.21.4`.
pub fn parse_client_name(version: &str) -> String {
    version
        .trim()
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn map_rpc_error(label: &'static str, err: JsonRpcError) -> anyhow::Error {
    if response_too_large(&err) {
        return RpcError::ResponseTooLarge { method: label }.into();
    }
    match err {
        JsonRpcError::Call(object) => match object.data() {
            Some(data) => anyhow!(
                "rpc {label} call failed (code={}, message={}, data={})",
                object.code(),
                object.message(),
                data.get()
            ),
            None => anyhow!(
                "rpc {label} call failed (code={}, message={})",
                object.code(),
                object.message()
            ),
        },
        JsonRpcError::RequestTimeout => RpcError::Timeout { method: label }.into(),
        other => anyhow!("rpc {label} call failed: {other}"),
    }
}

fn response_too_large(err: &JsonRpcError) -> bool {
    match err {
        JsonRpcError::Transport(inner) => {
            if let Some(transport_err) = inner.downcast_ref::<HttpTransportError>() {
                match transport_err {
                    HttpTransportError::Http(http_err) => matches!(http_err, HttpError::TooLarge),
                    HttpTransportError::RequestTooLarge => true,
                    _ => false,
                }
            } else {
                false
            }
        }
        _ => false,
    }
}
