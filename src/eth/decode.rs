//! Maps raw JSON results onto typed values.
//!
//! Scalar results go through the hex codec and must be JSON strings; only the
//! balance path reads `null` as zero, for nodes that omit an empty balance.
//! Amounts decode to [`BigUint`], an integer at scale 0 in wei. Structural
//! results deserialize field by field through the codec's serde adapters; a
//! `null` structural result is [`EthError::NotFound`], never a decode error.

use crate::codec::hex::{decode_u64, must_decode_big, must_decode_u64};
use crate::eth::error::EthError;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn scalar(method: &'static str, value: Value) -> Result<String, EthError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(EthError::Decode {
            method,
            message: format!("expected a string, got {other}"),
        }),
    }
}

/// Opaque hex blobs (storage words, code, hashes) pass through unchanged.
pub fn string_result(method: &'static str, value: Value) -> Result<String, EthError> {
    scalar(method, value)
}

pub fn u64_result(method: &'static str, value: Value) -> Result<u64, EthError> {
    decode_u64(&scalar(method, value)?)
}

/// # Panics
///
/// Panics when the node returns a string that is not a valid quantity.
pub fn must_u64_result(method: &'static str, value: Value) -> Result<u64, EthError> {
    Ok(must_decode_u64(&scalar(method, value)?))
}

/// Amounts as an integer at scale 0 in the chain's smallest denomination
/// (wei), i.e. a decimal with no fractional digits.
///
/// # Panics
///
/// Panics when the node returns a string that is not a valid quantity.
pub fn must_big_result(method: &'static str, value: Value) -> Result<BigUint, EthError> {
    Ok(must_decode_big(&scalar(method, value)?))
}

/// Like [`must_big_result`], but an absent balance (`null` or `""`) is zero.
///
/// # Panics
///
/// Panics when the node returns a string that is not a valid quantity.
pub fn balance_result(method: &'static str, value: Value) -> Result<BigUint, EthError> {
    match value {
        Value::Null => Ok(BigUint::default()),
        other => must_big_result(method, other),
    }
}

/// Decodes a lookup result; `null` means the node does not know the key.
pub fn record_result<R: DeserializeOwned>(method: &'static str, value: Value) -> Result<R, EthError> {
    if value.is_null() {
        return Err(EthError::NotFound { method });
    }
    serde_json::from_value(value).map_err(|err| EthError::Decode {
        method,
        message: err.to_string(),
    })
}

/// Decodes a query result list; `null` reads as no matches.
pub fn list_result<R: DeserializeOwned>(method: &'static str, value: Value) -> Result<Vec<R>, EthError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|err| EthError::Decode {
        method,
        message: err.to_string(),
    })
}
