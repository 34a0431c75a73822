//! Structural records returned by the eth namespace and the filter/request
//! types callers build. Quantity fields are decoded with the hex codec adapters.

pub mod block;
pub mod filter;
pub mod log;
pub mod receipt;
pub mod transaction;

pub use block::{Block, BlockWithHashes, BlockWithTransactions, Withdrawal};
pub use filter::{LogFilter, TopicFilter};
pub use log::Log;
pub use receipt::Receipt;
pub use transaction::{AccessListItem, Transaction, TransactionRequest};
