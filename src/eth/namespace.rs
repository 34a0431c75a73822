//! Typed `eth_*` operations.
//!
//! Every operation comes in two flavours: `foo_with_cancel(&token, ..)`
//! threads the caller's [`CancellationToken`] into the transport, and `foo(..)`
//! runs the same call under a fresh token nobody cancels. Both decode and fail
//! identically for the same node response.

use crate::codec::selector::BlockSelector;
use crate::eth::decode::{
    balance_result, list_result, must_big_result, must_u64_result, record_result, string_result,
    u64_result,
};
use crate::eth::methods::{
    has_overrides, resolve_method, ETH_BLOCK_NUMBER, ETH_CHAIN_ID, ETH_GAS_PRICE,
    ETH_GET_BALANCE, ETH_GET_BLOCK_BY_HASH, ETH_GET_BLOCK_BY_NUMBER, ETH_GET_BLOCK_RECEIPTS,
    ETH_GET_CODE, ETH_GET_LOGS, ETH_GET_STORAGE_AT, ETH_GET_TRANSACTION_BY_HASH,
    ETH_GET_TRANSACTION_COUNT, ETH_GET_TRANSACTION_RECEIPT, ETH_MAX_PRIORITY_FEE_PER_GAS,
};
use crate::eth::params::{
    account_params, block_by_hash_params, block_by_number_params, block_receipts_params,
    hash_params, log_params, storage_params,
};
use crate::eth::submit::{self, Signer};
use crate::rpc::client::{RpcError, Transport};
use crate::types::{
    BlockWithHashes, BlockWithTransactions, Log, LogFilter, Receipt, Transaction,
    TransactionRequest,
};
use anyhow::Result;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Borrowed view over a transport exposing the `eth` namespace.
///
/// Holds no mutable state; any number of namespaces may share one transport
/// across tasks.
pub struct EthNamespace<'a, T: Transport + ?Sized> {
    transport: &'a T,
    chain_id: u64,
}

impl<'a, T: Transport + ?Sized> Clone for EthNamespace<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: Transport + ?Sized> Copy for EthNamespace<'a, T> {}

impl<'a, T: Transport + ?Sized> EthNamespace<'a, T> {
    /// `chain_id` is the pre-resolved identifier used when signing.
    pub fn new(transport: &'a T, chain_id: u64) -> Self {
        Self {
            transport,
            chain_id,
        }
    }

    async fn call(
        &self,
        cancel: &CancellationToken,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<Value> {
        self.transport.call(cancel, method, params).await
    }

    /// Method name to dispatch for `canonical` on the connected node. The
    /// client name is only queried for methods some client renames; if that
    /// query fails for any reason other than cancellation, `canonical` is used.
    async fn resolve(
        &self,
        cancel: &CancellationToken,
        canonical: &'static str,
    ) -> Result<&'static str> {
        if !has_overrides(canonical) {
            return Ok(canonical);
        }
        match self.transport.node_client(cancel).await {
            Ok(client) => Ok(resolve_method(canonical, &client)),
            Err(err)
                if cancel.is_cancelled()
                    || matches!(
                        err.downcast_ref::<RpcError>(),
                        Some(RpcError::Cancelled { .. })
                    ) =>
            {
                Err(err)
            }
            Err(err) => {
                tracing::debug!(
                    canonical,
                    error = %err,
                    "client lookup failed, using canonical method"
                );
                Ok(canonical)
            }
        }
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id_with_cancel(&CancellationToken::new()).await
    }

    /// `eth_chainId`. A malformed answer is reported as
    /// [`EthError::MalformedHex`](crate::eth::error::EthError::MalformedHex).
    pub async fn chain_id_with_cancel(&self, cancel: &CancellationToken) -> Result<u64> {
        let value = self.call(cancel, ETH_CHAIN_ID, Vec::new()).await?;
        Ok(u64_result(ETH_CHAIN_ID, value)?)
    }

    pub async fn block_number(&self) -> Result<u64> {
        self.block_number_with_cancel(&CancellationToken::new()).await
    }

    /// `eth_blockNumber`.
    ///
    /// # Panics
    ///
    /// Panics if the node returns a malformed quantity.
    pub async fn block_number_with_cancel(&self, cancel: &CancellationToken) -> Result<u64> {
        let value = self.call(cancel, ETH_BLOCK_NUMBER, Vec::new()).await?;
        Ok(must_u64_result(ETH_BLOCK_NUMBER, value)?)
    }

    pub async fn storage_at(
        &self,
        address: &str,
        position: &str,
        block: BlockSelector,
    ) -> Result<String> {
        self.storage_at_with_cancel(&CancellationToken::new(), address, position, block)
            .await
    }

    /// `eth_getStorageAt`; the 32-byte word is returned as hex, undecoded.
    pub async fn storage_at_with_cancel(
        &self,
        cancel: &CancellationToken,
        address: &str,
        position: &str,
        block: BlockSelector,
    ) -> Result<String> {
        let params = storage_params(address, position, block);
        let value = self.call(cancel, ETH_GET_STORAGE_AT, params).await?;
        Ok(string_result(ETH_GET_STORAGE_AT, value)?)
    }

    pub async fn code(&self, address: &str, block: BlockSelector) -> Result<String> {
        self.code_with_cancel(&CancellationToken::new(), address, block)
            .await
    }

    /// `eth_getCode`.
    pub async fn code_with_cancel(
        &self,
        cancel: &CancellationToken,
        address: &str,
        block: BlockSelector,
    ) -> Result<String> {
        let value = self
            .call(cancel, ETH_GET_CODE, account_params(address, block))
            .await?;
        Ok(string_result(ETH_GET_CODE, value)?)
    }

    pub async fn balance(&self, address: &str, block: BlockSelector) -> Result<BigUint> {
        self.balance_with_cancel(&CancellationToken::new(), address, block)
            .await
    }

    /// `eth_getBalance` in wei, as an integer at scale 0. An empty or `null`
    /// answer reads as zero.
    ///
    /// # Panics
    ///
    /// Panics if the node returns a malformed quantity.
    pub async fn balance_with_cancel(
        &self,
        cancel: &CancellationToken,
        address: &str,
        block: BlockSelector,
    ) -> Result<BigUint> {
        let value = self
            .call(cancel, ETH_GET_BALANCE, account_params(address, block))
            .await?;
        Ok(balance_result(ETH_GET_BALANCE, value)?)
    }

    pub async fn transaction_count(&self, address: &str, block: BlockSelector) -> Result<u64> {
        self.transaction_count_with_cancel(&CancellationToken::new(), address, block)
            .await
    }

    /// `eth_getTransactionCount`, i.e. the account nonce at `block`.
    ///
    /// # Panics
    ///
    /// Panics if the node returns a malformed quantity.
    pub async fn transaction_count_with_cancel(
        &self,
        cancel: &CancellationToken,
        address: &str,
        block: BlockSelector,
    ) -> Result<u64> {
        let value = self
            .call(
                cancel,
                ETH_GET_TRANSACTION_COUNT,
                account_params(address, block),
            )
            .await?;
        Ok(must_u64_result(ETH_GET_TRANSACTION_COUNT, value)?)
    }

    async fn block_by_selector_as<B: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        block: BlockSelector,
        full: bool,
    ) -> Result<B> {
        let params = block_by_number_params(block, full)?;
        let value = self.call(cancel, ETH_GET_BLOCK_BY_NUMBER, params).await?;
        Ok(record_result(ETH_GET_BLOCK_BY_NUMBER, value)?)
    }

    async fn block_by_hash_as<B: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        hash: &str,
        full: bool,
    ) -> Result<B> {
        let params = block_by_hash_params(hash, full);
        let value = self.call(cancel, ETH_GET_BLOCK_BY_HASH, params).await?;
        Ok(record_result(ETH_GET_BLOCK_BY_HASH, value)?)
    }

    pub async fn block_by_selector(&self, block: BlockSelector) -> Result<BlockWithHashes> {
        self.block_by_selector_with_cancel(&CancellationToken::new(), block)
            .await
    }

    /// `eth_getBlockByNumber` with transaction hashes only.
    ///
    /// [`BlockSelector::Pending`] fails with
    /// [`EthError::PendingBlockUnsupported`](crate::eth::error::EthError::PendingBlockUnsupported)
    /// before anything is sent; an unknown block is
    /// [`EthError::NotFound`](crate::eth::error::EthError::NotFound).
    pub async fn block_by_selector_with_cancel(
        &self,
        cancel: &CancellationToken,
        block: BlockSelector,
    ) -> Result<BlockWithHashes> {
        self.block_by_selector_as(cancel, block, false).await
    }

    pub async fn block_by_selector_full(
        &self,
        block: BlockSelector,
    ) -> Result<BlockWithTransactions> {
        self.block_by_selector_full_with_cancel(&CancellationToken::new(), block)
            .await
    }

    /// Same as [`Self::block_by_selector_with_cancel`] with inlined
    /// transactions.
    pub async fn block_by_selector_full_with_cancel(
        &self,
        cancel: &CancellationToken,
        block: BlockSelector,
    ) -> Result<BlockWithTransactions> {
        self.block_by_selector_as(cancel, block, true).await
    }

    pub async fn block_by_number(&self, number: u64) -> Result<BlockWithHashes> {
        self.block_by_number_with_cancel(&CancellationToken::new(), number)
            .await
    }

    pub async fn block_by_number_with_cancel(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<BlockWithHashes> {
        self.block_by_selector_as(cancel, BlockSelector::Number(number), false)
            .await
    }

    pub async fn block_by_number_full(&self, number: u64) -> Result<BlockWithTransactions> {
        self.block_by_number_full_with_cancel(&CancellationToken::new(), number)
            .await
    }

    pub async fn block_by_number_full_with_cancel(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<BlockWithTransactions> {
        self.block_by_selector_as(cancel, BlockSelector::Number(number), true)
            .await
    }

    pub async fn block_by_hash(&self, hash: &str) -> Result<BlockWithHashes> {
        self.block_by_hash_with_cancel(&CancellationToken::new(), hash)
            .await
    }

    /// `eth_getBlockByHash` with transaction hashes only. An unknown hash is
    /// [`EthError::NotFound`](crate::eth::error::EthError::NotFound).
    pub async fn block_by_hash_with_cancel(
        &self,
        cancel: &CancellationToken,
        hash: &str,
    ) -> Result<BlockWithHashes> {
        self.block_by_hash_as(cancel, hash, false).await
    }

    pub async fn block_by_hash_full(&self, hash: &str) -> Result<BlockWithTransactions> {
        self.block_by_hash_full_with_cancel(&CancellationToken::new(), hash)
            .await
    }

    pub async fn block_by_hash_full_with_cancel(
        &self,
        cancel: &CancellationToken,
        hash: &str,
    ) -> Result<BlockWithTransactions> {
        self.block_by_hash_as(cancel, hash, true).await
    }

    pub async fn transaction(&self, hash: &str) -> Result<Transaction> {
        self.transaction_with_cancel(&CancellationToken::new(), hash)
            .await
    }

    /// `eth_getTransactionByHash`.
    pub async fn transaction_with_cancel(
        &self,
        cancel: &CancellationToken,
        hash: &str,
    ) -> Result<Transaction> {
        let value = self
            .call(cancel, ETH_GET_TRANSACTION_BY_HASH, hash_params(hash))
            .await?;
        Ok(record_result(ETH_GET_TRANSACTION_BY_HASH, value)?)
    }

    pub async fn transaction_receipt(&self, hash: &str) -> Result<Receipt> {
        self.transaction_receipt_with_cancel(&CancellationToken::new(), hash)
            .await
    }

    /// `eth_getTransactionReceipt`. Receipts of pending or unknown
    /// transactions are [`EthError::NotFound`](crate::eth::error::EthError::NotFound).
    pub async fn transaction_receipt_with_cancel(
        &self,
        cancel: &CancellationToken,
        hash: &str,
    ) -> Result<Receipt> {
        let value = self
            .call(cancel, ETH_GET_TRANSACTION_RECEIPT, hash_params(hash))
            .await?;
        Ok(record_result(ETH_GET_TRANSACTION_RECEIPT, value)?)
    }

    pub async fn block_receipts(&self, number: u64) -> Result<Vec<Receipt>> {
        self.block_receipts_with_cancel(&CancellationToken::new(), number)
            .await
    }

    /// All receipts of block `number`, under whichever method name the
    /// connected client serves them.
    pub async fn block_receipts_with_cancel(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<Vec<Receipt>> {
        let method = self.resolve(cancel, ETH_GET_BLOCK_RECEIPTS).await?;
        let value = self
            .call(cancel, method, block_receipts_params(number))
            .await?;
        Ok(record_result(method, value)?)
    }

    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>> {
        self.logs_with_cancel(&CancellationToken::new(), filter)
            .await
    }

    /// `eth_getLogs`. A filter without a block hash must carry both range
    /// bounds, otherwise
    /// [`EthError::IncompleteBlockRange`](crate::eth::error::EthError::IncompleteBlockRange)
    /// is returned without a call.
    pub async fn logs_with_cancel(
        &self,
        cancel: &CancellationToken,
        filter: &LogFilter,
    ) -> Result<Vec<Log>> {
        let params = log_params(filter)?;
        let value = self.call(cancel, ETH_GET_LOGS, params).await?;
        Ok(list_result(ETH_GET_LOGS, value)?)
    }

    pub async fn logs_by_block_number(&self, number: u64) -> Result<Vec<Log>> {
        self.logs_by_block_number_with_cancel(&CancellationToken::new(), number)
            .await
    }

    pub async fn logs_by_block_number_with_cancel(
        &self,
        cancel: &CancellationToken,
        number: u64,
    ) -> Result<Vec<Log>> {
        self.logs_with_cancel(cancel, &LogFilter::at_block(number))
            .await
    }

    pub async fn logs_by_block_hash(&self, hash: &str) -> Result<Vec<Log>> {
        self.logs_by_block_hash_with_cancel(&CancellationToken::new(), hash)
            .await
    }

    pub async fn logs_by_block_hash_with_cancel(
        &self,
        cancel: &CancellationToken,
        hash: &str,
    ) -> Result<Vec<Log>> {
        self.logs_with_cancel(cancel, &LogFilter::at_hash(hash))
            .await
    }

    pub async fn gas_price(&self) -> Result<BigUint> {
        self.gas_price_with_cancel(&CancellationToken::new()).await
    }

    /// `eth_gasPrice` in wei, as an integer at scale 0.
    ///
    /// # Panics
    ///
    /// Panics if the node returns a malformed quantity.
    pub async fn gas_price_with_cancel(&self, cancel: &CancellationToken) -> Result<BigUint> {
        let value = self.call(cancel, ETH_GAS_PRICE, Vec::new()).await?;
        Ok(must_big_result(ETH_GAS_PRICE, value)?)
    }

    pub async fn max_priority_fee_per_gas(&self) -> Result<BigUint> {
        self.max_priority_fee_per_gas_with_cancel(&CancellationToken::new())
            .await
    }

    /// `eth_maxPriorityFeePerGas` in wei, as an integer at scale 0.
    ///
    /// # Panics
    ///
    /// Panics if the node returns a malformed quantity.
    pub async fn max_priority_fee_per_gas_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<BigUint> {
        let value = self
            .call(cancel, ETH_MAX_PRIORITY_FEE_PER_GAS, Vec::new())
            .await?;
        Ok(must_big_result(ETH_MAX_PRIORITY_FEE_PER_GAS, value)?)
    }

    pub async fn send_raw_transaction(&self, raw: &str) -> Result<String> {
        self.send_raw_transaction_with_cancel(&CancellationToken::new(), raw)
            .await
    }

    /// `eth_sendRawTransaction`; returns the hash reported by the node.
    pub async fn send_raw_transaction_with_cancel(
        &self,
        cancel: &CancellationToken,
        raw: &str,
    ) -> Result<String> {
        submit::send_raw_transaction(self.transport, cancel, raw).await
    }

    pub async fn send_transaction<S: Signer + ?Sized>(
        &self,
        tx: &TransactionRequest,
        signer: &S,
    ) -> Result<String> {
        self.send_transaction_with_cancel(&CancellationToken::new(), tx, signer)
            .await
    }

    /// Signs `tx` for this client's chain, submits it, and checks the node
    /// reports the same hash. A disagreement is
    /// [`EthError::TransactionHashMismatch`](crate::eth::error::EthError::TransactionHashMismatch).
    pub async fn send_transaction_with_cancel<S: Signer + ?Sized>(
        &self,
        cancel: &CancellationToken,
        tx: &TransactionRequest,
        signer: &S,
    ) -> Result<String> {
        submit::send_transaction(self.transport, cancel, self.chain_id, tx, signer).await
    }
}
