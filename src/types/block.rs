use crate::codec::hex::{serde_big, serde_opt_big, serde_opt_u64, serde_u64};
use crate::types::transaction::Transaction;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Block header fields plus its transactions, represented as `T`.
///
/// Lookups that omit transaction bodies return [`BlockWithHashes`]; the
/// `*_full` lookups return [`BlockWithTransactions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block<T> {
    #[serde(with = "serde_u64")]
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    #[serde(default)]
    pub nonce: Option<String>,
    pub sha3_uncles: String,
    pub logs_bloom: String,
    pub transactions_root: String,
    pub state_root: String,
    pub receipts_root: String,
    pub miner: String,
    #[serde(default, with = "serde_big")]
    pub difficulty: BigUint,
    #[serde(default, with = "serde_opt_big")]
    pub total_difficulty: Option<BigUint>,
    pub extra_data: String,
    #[serde(default, with = "serde_u64")]
    pub size: u64,
    #[serde(with = "serde_u64")]
    pub gas_limit: u64,
    #[serde(with = "serde_u64")]
    pub gas_used: u64,
    #[serde(with = "serde_u64")]
    pub timestamp: u64,
    #[serde(default)]
    pub mix_hash: Option<String>,
    #[serde(default, with = "serde_opt_big")]
    pub base_fee_per_gas: Option<BigUint>,
    #[serde(default)]
    pub withdrawals_root: Option<String>,
    #[serde(default)]
    pub withdrawals: Option<Vec<Withdrawal>>,
    #[serde(default, with = "serde_opt_u64")]
    pub blob_gas_used: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub excess_blob_gas: Option<u64>,
    #[serde(default)]
    pub parent_beacon_block_root: Option<String>,
    #[serde(default)]
    pub requests_hash: Option<String>,
    #[serde(default = "Vec::new")]
    pub transactions: Vec<T>,
    #[serde(default)]
    pub uncles: Vec<String>,
}

pub type BlockWithHashes = Block<String>;
pub type BlockWithTransactions = Block<Transaction>;

impl<T> Block<T> {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(with = "serde_u64")]
    pub index: u64,
    #[serde(with = "serde_u64")]
    pub validator_index: u64,
    pub address: String,
    /// Amount in gwei.
    #[serde(with = "serde_u64")]
    pub amount: u64,
}
