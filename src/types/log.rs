use crate::codec::hex::serde_opt_u64;
use serde::{Deserialize, Serialize};

/// Event record emitted by a transaction.
///
/// Position fields are `None` only for logs of pending transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub data: String,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default, with = "serde_opt_u64")]
    pub block_number: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub block_timestamp: Option<u64>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default, with = "serde_opt_u64")]
    pub transaction_index: Option<u64>,
    #[serde(default, with = "serde_opt_u64")]
    pub log_index: Option<u64>,
    #[serde(default)]
    pub removed: bool,
}
