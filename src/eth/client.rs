//! Connected client: owns the transport and the chain id used for signing.

use crate::eth::namespace::EthNamespace;
use crate::rpc::client::{HttpTransport, Transport};
use crate::runtime::config::ClientConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct EvmClient<T: Transport + ?Sized = HttpTransport> {
    transport: Arc<T>,
    chain_id: u64,
}

impl<T: Transport + ?Sized> Clone for EvmClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            chain_id: self.chain_id,
        }
    }
}

impl EvmClient<HttpTransport> {
    /// Builds an HTTP transport from `config` and resolves the chain id with
    /// one `eth_chainId` call unless the config already carries it.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        Self::connect_with_cancel(&CancellationToken::new(), config).await
    }

    pub async fn connect_with_cancel(
        cancel: &CancellationToken,
        config: &ClientConfig,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(config)?);
        let chain_id = match config.chain_id() {
            Some(chain_id) => chain_id,
            None => EthNamespace::new(transport.as_ref(), 0)
                .chain_id_with_cancel(cancel)
                .await
                .with_context(|| format!("failed to resolve chain id from {}", config.rpc_url()))?,
        };
        tracing::info!(endpoint = config.rpc_url(), chain_id, "connected to node");
        Ok(Self {
            transport,
            chain_id,
        })
    }
}

impl<T: Transport + ?Sized> EvmClient<T> {
    pub fn new(transport: Arc<T>, chain_id: u64) -> Self {
        Self {
            transport,
            chain_id,
        }
    }

    pub fn eth(&self) -> EthNamespace<'_, T> {
        EthNamespace::new(self.transport.as_ref(), self.chain_id)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }
}
