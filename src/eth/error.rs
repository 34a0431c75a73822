//! Error conditions raised by the eth namespace itself, as opposed to the
//! opaque transport failures it propagates. Values travel inside
//! `anyhow::Error` and are recovered with `downcast_ref::<EthError>()`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EthError {
    /// A value expected to be a canonical hex integer was not.
    MalformedHex { value: String },
    /// The pending block cannot be fetched by number/tag.
    PendingBlockUnsupported,
    /// The node answered a lookup with `null`.
    NotFound { method: &'static str },
    /// The node reported a different transaction hash than the one computed
    /// locally while signing.
    TransactionHashMismatch { local: String, remote: String },
    /// A log filter without a block hash must carry both range bounds.
    IncompleteBlockRange,
    /// The node returned a value that does not match the expected shape.
    Decode { method: &'static str, message: String },
}

impl std::fmt::Display for EthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EthError::MalformedHex { value } => write!(f, "malformed hex integer {value:?}"),
            EthError::PendingBlockUnsupported => {
                write!(f, "pending block is not supported for block lookups")
            }
            EthError::NotFound { method } => write!(f, "{method} returned no result"),
            EthError::TransactionHashMismatch { local, remote } => write!(
                f,
                "transaction hash mismatch (local {local}, remote {remote})"
            ),
            EthError::IncompleteBlockRange => {
                write!(f, "log filter requires both fromBlock and toBlock")
            }
            EthError::Decode { method, message } => {
                write!(f, "failed to decode {method} result: {message}")
            }
        }
    }
}

impl std::error::Error for EthError {}

impl EthError {
    pub(crate) fn malformed(value: &str) -> Self {
        EthError::MalformedHex {
            value: value.to_owned(),
        }
    }

    /// Returns true when `err` wraps [`EthError::NotFound`].
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<EthError>(), Some(EthError::NotFound { .. }))
    }
}
