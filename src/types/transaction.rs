use crate::codec::hex::{serde_big, serde_opt_big, serde_opt_u64, serde_u64};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Transaction as returned by `eth_getTransactionByHash` or inlined in a
/// block fetched with full transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    /// `None` while the transaction is pending.
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default, with = "serde_opt_u64")]
    pub block_number: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub transaction_index: Option<u64>,
    pub from: String,
    /// `None` for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(with = "serde_u64")]
    pub nonce: u64,
    #[serde(with = "serde_big")]
    pub value: BigUint,
    #[serde(with = "serde_u64")]
    pub gas: u64,
    #[serde(default, with = "serde_opt_big")]
    pub gas_price: Option<BigUint>,
    #[serde(default, with = "serde_opt_big")]
    pub max_fee_per_gas: Option<BigUint>,
    #[serde(default, with = "serde_opt_big")]
    pub max_priority_fee_per_gas: Option<BigUint>,
    #[serde(default, with = "serde_opt_big")]
    pub max_fee_per_blob_gas: Option<BigUint>,
    pub input: String,
    #[serde(rename = "type", default, with = "serde_u64")]
    pub tx_type: u64,
    #[serde(default, with = "serde_opt_u64")]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub access_list: Option<Vec<AccessListItem>>,
    #[serde(default)]
    pub blob_versioned_hashes: Option<Vec<String>>,
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub r: Option<String>,
    #[serde(default)]
    pub s: Option<String>,
    #[serde(default)]
    pub y_parity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    pub address: String,
    #[serde(default)]
    pub storage_keys: Vec<String>,
}

/// Unsigned transaction handed to a [`Signer`](crate::eth::submit::Signer).
///
/// Leave `max_fee_per_gas` unset to build a legacy transaction priced with
/// `gas_price`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    pub to: Option<String>,
    pub value: BigUint,
    pub data: Vec<u8>,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: Option<BigUint>,
    pub max_fee_per_gas: Option<BigUint>,
    pub max_priority_fee_per_gas: Option<BigUint>,
}

impl TransactionRequest {
    pub fn is_dynamic_fee(&self) -> bool {
        self.max_fee_per_gas.is_some()
    }
}
