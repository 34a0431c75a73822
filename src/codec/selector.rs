//! Block selector parameter: an exact height or one of the symbolic tags the
//! node understands.

use crate::codec::hex::{decode_u64, encode_u64};
use crate::eth::error::EthError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockSelector {
    Number(u64),
    Earliest,
    #[default]
    Latest,
    Safe,
    Finalized,
    Pending,
}

impl BlockSelector {
    /// Tag string for symbolic selectors, `None` for exact heights.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            BlockSelector::Number(_) => None,
            BlockSelector::Earliest => Some("earliest"),
            BlockSelector::Latest => Some("latest"),
            BlockSelector::Safe => Some("safe"),
            BlockSelector::Finalized => Some("finalized"),
            BlockSelector::Pending => Some("pending"),
        }
    }

    /// Canonical wire form: a quantity for heights, the lowercase tag otherwise.
    pub fn to_param(&self) -> String {
        match self {
            BlockSelector::Number(number) => encode_u64(*number),
            tagged => tagged.tag().unwrap_or_default().to_owned(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, BlockSelector::Pending)
    }
}

impl From<u64> for BlockSelector {
    fn from(number: u64) -> Self {
        BlockSelector::Number(number)
    }
}

impl fmt::Display for BlockSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

impl FromStr for BlockSelector {
    type Err = EthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earliest" => Ok(BlockSelector::Earliest),
            "latest" => Ok(BlockSelector::Latest),
            "safe" => Ok(BlockSelector::Safe),
            "finalized" => Ok(BlockSelector::Finalized),
            "pending" => Ok(BlockSelector::Pending),
            // the empty string would decode to zero, which is not a selector
            "" => Err(EthError::malformed(value)),
            number => decode_u64(number).map(BlockSelector::Number),
        }
    }
}

impl Serialize for BlockSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_param())
    }
}
