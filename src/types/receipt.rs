use crate::codec::hex::{serde_opt_big, serde_opt_u64, serde_u64};
use crate::types::log::Log;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Post-execution record of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    #[serde(with = "serde_u64")]
    pub transaction_index: u64,
    pub block_hash: String,
    #[serde(with = "serde_u64")]
    pub block_number: u64,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(with = "serde_u64")]
    pub cumulative_gas_used: u64,
    #[serde(with = "serde_u64")]
    pub gas_used: u64,
    #[serde(default, with = "serde_opt_big")]
    pub effective_gas_price: Option<BigUint>,
    #[serde(default, with = "serde_opt_u64")]
    pub blob_gas_used: Option<u64>,
    #[serde(default, with = "serde_opt_big")]
    pub blob_gas_price: Option<BigUint>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub logs: Vec<Log>,
    pub logs_bloom: String,
    #[serde(rename = "type", default, with = "serde_u64")]
    pub tx_type: u64,
    /// `Some(1)` on success, `Some(0)` on failure; absent before Byzantium.
    #[serde(default, with = "serde_opt_u64")]
    pub status: Option<u64>,
    /// Post-transaction state root; only present before Byzantium.
    #[serde(default)]
    pub root: Option<String>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == Some(1)
    }
}
