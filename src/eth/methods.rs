//! Canonical JSON-RPC method names and the per-client override table.
//!
//! Node implementations do not all agree on method naming for equivalent
//! functionality. Every divergence is one row in [`METHOD_OVERRIDES`];
//! supporting a new client never needs a new branch at the call site.

pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
pub const ETH_GET_STORAGE_AT: &str = "eth_getStorageAt";
pub const ETH_GET_CODE: &str = "eth_getCode";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const ETH_GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
pub const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
pub const ETH_GET_BLOCK_BY_HASH: &str = "eth_getBlockByHash";
pub const ETH_GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";
pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
pub const ETH_GET_BLOCK_RECEIPTS: &str = "eth_getBlockReceipts";
pub const ETH_GET_TRANSACTION_RECEIPTS_BY_BLOCK: &str = "eth_getTransactionReceiptsByBlock";
pub const ETH_GET_LOGS: &str = "eth_getLogs";
pub const ETH_GAS_PRICE: &str = "eth_gasPrice";
pub const ETH_MAX_PRIORITY_FEE_PER_GAS: &str = "eth_maxPriorityFeePerGas";
pub const ETH_SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";
pub const WEB3_CLIENT_VERSION: &str = "web3_clientVersion";

pub const CLIENT_BOR: &str = "bor";

/// One naming divergence: `client` serves `canonical` under `method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodOverride {
    pub canonical: &'static str,
    pub client: &'static str,
    pub method: &'static str,
}

pub const METHOD_OVERRIDES: &[MethodOverride] = &[MethodOverride {
    canonical: ETH_GET_BLOCK_RECEIPTS,
    client: CLIENT_BOR,
    method: ETH_GET_TRANSACTION_RECEIPTS_BY_BLOCK,
}];

/// Returns the method name `client` expects for `canonical`.
///
/// Client names compare case-insensitively; unknown clients and methods
/// without an override resolve to `canonical`.
pub fn resolve_method(canonical: &'static str, client: &str) -> &'static str {
    METHOD_OVERRIDES
        .iter()
        .find(|entry| entry.canonical == canonical && entry.client.eq_ignore_ascii_case(client))
        .map(|entry| {
            tracing::trace!(canonical, client, method = entry.method, "method overridden");
            entry.method
        })
        .unwrap_or(canonical)
}

/// Whether any client renames `canonical`. Lets callers skip the client
/// lookup for methods that never diverge.
pub fn has_overrides(canonical: &str) -> bool {
    METHOD_OVERRIDES
        .iter()
        .any(|entry| entry.canonical == canonical)
}
