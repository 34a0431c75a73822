//! Conversions between the node's quantity encoding (`0x`-prefixed, minimal,
//! lowercase hex) and native integers.
//!
//! Two decode flavours exist. The `decode_*` functions return
//! [`EthError::MalformedHex`] on bad input. The `must_decode_*` functions are
//! reserved for values the node always formats correctly (block numbers,
//! nonces, fee quotes) and panic instead, aborting the calling operation.
//! Both treat an empty string as zero.

use crate::eth::error::EthError;
use num_bigint::BigUint;
use num_traits::Zero;

const U64_HEX_DIGITS: usize = 16;
const U256_HEX_DIGITS: usize = 64;

/// Encodes `value` as a minimal quantity, `0x0` for zero.
pub fn encode_u64(value: u64) -> String {
    format!("{value:#x}")
}

/// Encodes an arbitrary-precision integer as a minimal quantity.
pub fn encode_big(value: &BigUint) -> String {
    format!("{value:#x}")
}

pub fn decode_u64(input: &str) -> Result<u64, EthError> {
    if input.is_empty() {
        return Ok(0);
    }
    let digits = quantity_digits(input, U64_HEX_DIGITS)?;
    u64::from_str_radix(digits, 16).map_err(|_| EthError::malformed(input))
}

/// Strict form of [`decode_u64`].
///
/// # Panics
///
/// Panics when `input` is not a valid quantity.
pub fn must_decode_u64(input: &str) -> u64 {
    match decode_u64(input) {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Decodes a quantity of up to 256 bits.
pub fn decode_big(input: &str) -> Result<BigUint, EthError> {
    if input.is_empty() {
        return Ok(BigUint::zero());
    }
    let digits = quantity_digits(input, U256_HEX_DIGITS)?;
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| EthError::malformed(input))
}

/// Strict form of [`decode_big`].
///
/// # Panics
///
/// Panics when `input` is not a valid quantity.
pub fn must_decode_big(input: &str) -> BigUint {
    match decode_big(input) {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

fn quantity_digits(input: &str, max_digits: usize) -> Result<&str, EthError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .ok_or_else(|| EthError::malformed(input))?;

    if digits.is_empty()
        || digits.len() > max_digits
        || !digits.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return Err(EthError::malformed(input));
    }
    // leading zeros are rejected so every value has a single encoding
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(EthError::malformed(input));
    }
    Ok(digits)
}

/// `#[serde(with = "...")]` adapter for `u64` quantity fields.
pub mod serde_u64 {
    use super::{decode_u64, encode_u64};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_u64(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        decode_u64(&raw).map_err(D::Error::custom)
    }
}

/// Adapter for optional `u64` quantity fields; `null` and absent map to `None`.
pub mod serde_opt_u64 {
    use super::{decode_u64, encode_u64};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&encode_u64(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| decode_u64(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

/// Adapter for amount fields that may exceed 64 bits.
pub mod serde_big {
    use super::{decode_big, encode_big};
    use num_bigint::BigUint;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_big(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        decode_big(&raw).map_err(D::Error::custom)
    }
}

pub mod serde_opt_big {
    use super::{decode_big, encode_big};
    use num_bigint::BigUint;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<BigUint>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&encode_big(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigUint>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| decode_big(&raw).map_err(D::Error::custom))
            .transpose()
    }
}
