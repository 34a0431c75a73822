//! Positional and keyed parameter assembly, one function per method family.
//!
//! Optional values are expressed by omission, never by inserting `null`.

use crate::codec::hex::encode_u64;
use crate::codec::selector::BlockSelector;
use crate::eth::error::EthError;
use crate::types::filter::LogFilter;
use serde_json::{Map, Value};

/// `[address, position, block]` for `eth_getStorageAt`.
pub fn storage_params(address: &str, position: &str, block: BlockSelector) -> Vec<Value> {
    vec![
        Value::from(address),
        Value::from(position),
        Value::from(block.to_param()),
    ]
}

/// `[address, block]` for code, balance, and transaction count reads.
pub fn account_params(address: &str, block: BlockSelector) -> Vec<Value> {
    vec![Value::from(address), Value::from(block.to_param())]
}

/// `[block, full]` for `eth_getBlockByNumber`.
///
/// The pending block is rejected here so the call is never dispatched.
pub fn block_by_number_params(block: BlockSelector, full: bool) -> Result<Vec<Value>, EthError> {
    if block.is_pending() {
        return Err(EthError::PendingBlockUnsupported);
    }
    Ok(vec![Value::from(block.to_param()), Value::Bool(full)])
}

/// `[hash, full]` for `eth_getBlockByHash`.
pub fn block_by_hash_params(hash: &str, full: bool) -> Vec<Value> {
    vec![Value::from(hash), Value::Bool(full)]
}

/// `[hash]` for transaction and receipt lookups.
pub fn hash_params(hash: &str) -> Vec<Value> {
    vec![Value::from(hash)]
}

/// `[number]` for block receipts, under either method name.
pub fn block_receipts_params(number: u64) -> Vec<Value> {
    vec![Value::from(encode_u64(number))]
}

/// `[raw]` for `eth_sendRawTransaction`.
pub fn raw_transaction_params(raw: &str) -> Vec<Value> {
    vec![Value::from(raw)]
}

/// Keyed filter object for `eth_getLogs`.
///
/// A block hash wins over the range: with a hash present only `blockHash` is
/// emitted. Without one, both bounds are mandatory.
pub fn log_query(filter: &LogFilter) -> Result<Map<String, Value>, EthError> {
    let mut query = Map::new();

    match (&filter.block_hash, filter.from_block, filter.to_block) {
        (Some(hash), _, _) => {
            query.insert("blockHash".into(), Value::from(hash.as_str()));
        }
        (None, Some(from), Some(to)) => {
            query.insert("fromBlock".into(), Value::from(encode_u64(from)));
            query.insert("toBlock".into(), Value::from(encode_u64(to)));
        }
        (None, _, _) => return Err(EthError::IncompleteBlockRange),
    }

    match filter.addresses.as_slice() {
        [] => {}
        [single] => {
            query.insert("address".into(), Value::from(single.as_str()));
        }
        many => {
            query.insert("address".into(), Value::from(many.to_vec()));
        }
    }

    if !filter.topics.is_empty() {
        let topics = filter.topics.iter().map(Value::from).collect();
        query.insert("topics".into(), Value::Array(topics));
    }

    Ok(query)
}

/// `[filter]` for `eth_getLogs`: the keyed object from [`log_query`] as the
/// single positional parameter.
pub fn log_params(filter: &LogFilter) -> Result<Vec<Value>, EthError> {
    Ok(vec![Value::Object(log_query(filter)?)])
}
