use crate::rpc::options::{
    RpcClientOptions, DEFAULT_HTTP_BODY_LIMIT_BYTES, DEFAULT_MAX_CONCURRENT_REQUESTS,
    DEFAULT_REQUEST_TIMEOUT,
};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

pub const ENV_RPC_URL: &str = "EVMRPC_URL";
pub const ENV_RPC_USER: &str = "EVMRPC_USER";
pub const ENV_RPC_PASSWORD: &str = "EVMRPC_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "EVMRPC_TIMEOUT_SECS";
pub const ENV_CHAIN_ID: &str = "EVMRPC_CHAIN_ID";

/// Connection settings for an [`EvmClient`](crate::EvmClient).
///
/// All instances must be constructed via [`ClientConfig::builder`],
/// [`ClientConfig::new`] or [`ClientConfig::from_env`] so invariants are
/// validated before any consumer observes the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    rpc_url: String,
    rpc_user: Option<String>,
    rpc_password: Option<String>,
    chain_id: Option<u64>,
    request_timeout: Duration,
    max_concurrent_requests: usize,
    max_request_body_bytes: usize,
    max_response_body_bytes: usize,
}

pub struct ClientConfigParams {
    pub rpc_url: String,
    pub rpc_user: Option<String>,
    pub rpc_password: Option<String>,
    pub chain_id: Option<u64>,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub max_request_body_bytes: usize,
    pub max_response_body_bytes: usize,
}

impl ClientConfig {
    /// Returns a builder to incrementally construct and validate a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Constructs a configuration directly from the provided values.
    pub fn new(params: ClientConfigParams) -> Result<Self> {
        let ClientConfigParams {
            rpc_url,
            rpc_user,
            rpc_password,
            chain_id,
            request_timeout,
            max_concurrent_requests,
            max_request_body_bytes,
            max_response_body_bytes,
        } = params;

        let config = Self {
            rpc_url: rpc_url.trim().to_owned(),
            rpc_user: rpc_user.map(trimmed_string),
            rpc_password: rpc_password.map(trimmed_string),
            chain_id,
            request_timeout,
            max_concurrent_requests,
            max_request_body_bytes,
            max_response_body_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from `EVMRPC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder().rpc_url(
            lookup(ENV_RPC_URL).with_context(|| format!("{ENV_RPC_URL} is not set"))?,
        );

        if let Some(user) = lookup(ENV_RPC_USER) {
            builder = builder.rpc_user(user);
        }
        if let Some(password) = lookup(ENV_RPC_PASSWORD) {
            builder = builder.rpc_password(password);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be an integer, got {raw:?}"))?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup(ENV_CHAIN_ID) {
            let chain_id: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_CHAIN_ID} must be an integer, got {raw:?}"))?;
            builder = builder.chain_id(chain_id);
        }

        builder.build()
    }

    /// Full RPC URL (including scheme) of the node.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Basic auth credentials, when configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.rpc_user, &self.rpc_password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }

    /// Chain id to sign with; resolved from the node at connect time when `None`.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Per-call timeout applied by the HTTP transport.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    pub fn max_request_body_bytes(&self) -> usize {
        self.max_request_body_bytes
    }

    pub fn max_response_body_bytes(&self) -> usize {
        self.max_response_body_bytes
    }

    /// Performs validation on an existing configuration instance.
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.rpc_url)?;

        match (&self.rpc_user, &self.rpc_password) {
            (Some(user), Some(password)) => {
                ensure_not_empty(user, "rpc_user")?;
                ensure_not_empty(password, "rpc_password")?;
            }
            (None, None) => {}
            _ => bail!("rpc_user and rpc_password must be set together"),
        }

        self.rpc_options().validate()
    }

    /// Transport limits carried by this configuration.
    pub fn rpc_options(&self) -> RpcClientOptions {
        RpcClientOptions {
            request_timeout: self.request_timeout,
            max_concurrent_requests: self.max_concurrent_requests,
            max_request_body_bytes: self.max_request_body_bytes,
            max_response_body_bytes: self.max_response_body_bytes,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    rpc_url: Option<String>,
    rpc_user: Option<String>,
    rpc_password: Option<String>,
    chain_id: Option<u64>,
    request_timeout: Option<Duration>,
    max_concurrent_requests: Option<usize>,
    max_request_body_bytes: Option<usize>,
    max_response_body_bytes: Option<usize>,
}

impl ClientConfigBuilder {
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn rpc_user(mut self, user: impl Into<String>) -> Self {
        self.rpc_user = Some(user.into());
        self
    }

    pub fn rpc_password(mut self, password: impl Into<String>) -> Self {
        self.rpc_password = Some(password.into());
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn max_concurrent_requests(mut self, count: usize) -> Self {
        self.max_concurrent_requests = Some(count);
        self
    }

    pub fn max_request_body_bytes(mut self, bytes: usize) -> Self {
        self.max_request_body_bytes = Some(bytes);
        self
    }

    pub fn max_response_body_bytes(mut self, bytes: usize) -> Self {
        self.max_response_body_bytes = Some(bytes);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let params = ClientConfigParams {
            rpc_url: self.rpc_url.context("rpc_url is required")?,
            rpc_user: self.rpc_user,
            rpc_password: self.rpc_password,
            chain_id: self.chain_id,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            max_concurrent_requests: self
                .max_concurrent_requests
                .unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS),
            max_request_body_bytes: self
                .max_request_body_bytes
                .unwrap_or(DEFAULT_HTTP_BODY_LIMIT_BYTES),
            max_response_body_bytes: self
                .max_response_body_bytes
                .unwrap_or(DEFAULT_HTTP_BODY_LIMIT_BYTES),
        };

        ClientConfig::new(params)
    }
}

fn trimmed_string(value: String) -> String {
    value.trim().to_owned()
}

fn ensure_not_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} cannot be empty");
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("rpc_url must start with http:// or https://");
    }
    Ok(())
}
