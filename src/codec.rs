//! Wire encodings shared by parameter assembly and result decoding.

pub mod hex;
pub mod selector;

pub use selector::BlockSelector;
