pub mod codec;
pub mod eth;
pub mod rpc;
pub mod runtime;
pub mod types;

pub use codec::BlockSelector;
pub use eth::{EthError, EthNamespace, EvmClient, SignedTransaction, Signer};
pub use rpc::{HttpTransport, RpcClientOptions, RpcError, RpcMetricsSnapshot, Transport};
pub use runtime::config::{ClientConfig, ClientConfigBuilder, ClientConfigParams};
pub use runtime::telemetry::{init_tracing, init_tracing_with};
pub use types::{
    Block, BlockWithHashes, BlockWithTransactions, Log, LogFilter, Receipt, TopicFilter,
    Transaction, TransactionRequest,
};
