//! Process-level glue: client configuration and tracing setup.

pub mod config;
pub mod telemetry;
