//! The `eth` JSON-RPC namespace: method names, parameter assembly, result
//! decoding, transaction submission, and the typed facade over them.

pub mod client;
pub mod decode;
pub mod error;
pub mod methods;
pub mod namespace;
pub mod params;
pub mod submit;


pub use client::EvmClient;
pub use error::EthError;
pub use namespace::EthNamespace;
pub use submit::{SignedTransaction, Signer};
