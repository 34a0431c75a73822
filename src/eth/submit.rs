//! Sign → submit → verify. Linear, no retries, nothing retained between
//! steps.

use crate::eth::decode::string_result;
use crate::eth::error::EthError;
use crate::eth::methods::ETH_SEND_RAW_TRANSACTION;
use crate::eth::params::raw_transaction_params;
use crate::rpc::client::Transport;
use crate::types::transaction::TransactionRequest;
use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Output of a [`Signer`]: the locally computed hash and the encoded signed
/// payload, both `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub hash: String,
    pub raw: String,
}

/// Signing capability backed by whatever holds the keys.
pub trait Signer: Send + Sync {
    fn sign_transaction(
        &self,
        tx: &TransactionRequest,
        chain_id: u64,
    ) -> Result<SignedTransaction>;
}

pub(crate) async fn send_raw_transaction<T>(
    transport: &T,
    cancel: &CancellationToken,
    raw: &str,
) -> Result<String>
where
    T: Transport + ?Sized,
{
    let value = transport
        .call(cancel, ETH_SEND_RAW_TRANSACTION, raw_transaction_params(raw))
        .await?;
    Ok(string_result(ETH_SEND_RAW_TRANSACTION, value)?)
}

pub(crate) async fn send_transaction<T, S>(
    transport: &T,
    cancel: &CancellationToken,
    chain_id: u64,
    tx: &TransactionRequest,
    signer: &S,
) -> Result<String>
where
    T: Transport + ?Sized,
    S: Signer + ?Sized,
{
    let SignedTransaction { hash, raw } = signer.sign_transaction(tx, chain_id)?;
    let remote = send_raw_transaction(transport, cancel, &raw).await?;
    let accepted = verify_hash(hash, remote)?;
    tracing::debug!(hash = %accepted, chain_id, "transaction submitted");
    Ok(accepted)
}

fn verify_hash(local: String, remote: String) -> Result<String, EthError> {
    // hex digits may legitimately differ in case
    if local.eq_ignore_ascii_case(&remote) {
        Ok(remote)
    } else {
        Err(EthError::TransactionHashMismatch { local, remote })
    }
}
