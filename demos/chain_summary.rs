use std::env;

use anyhow::{Context, Result};
use evmrpc::{BlockSelector, ClientConfig, EthError, EvmClient, Transport};
use tokio_util::sync::CancellationToken;

const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Prints a short summary of the node behind `EVMRPC_URL`.
///
/// Pass an address as the first argument to also print its balance and nonce.
#[tokio::main]
async fn main() -> Result<()> {
    evmrpc::init_tracing_with(DEFAULT_LOG_DIRECTIVE);

    let config = ClientConfig::from_env().context("set EVMRPC_URL to a node endpoint")?;
    let client = EvmClient::connect(&config).await?;
    let eth = client.eth();

    let client_name = client
        .transport()
        .node_client(&CancellationToken::new())
        .await?;
    println!("endpoint      {}", client.transport().endpoint());
    println!("client        {client_name}");
    println!("chain id      {}", client.chain_id());

    let tip = eth.block_number().await?;
    println!("tip           {tip}");

    match eth.block_by_selector(BlockSelector::Latest).await {
        Ok(block) => println!(
            "latest block  {} ({} txs, gas used {})",
            block.hash,
            block.transaction_count(),
            block.gas_used
        ),
        Err(err) if EthError::is_not_found(&err) => println!("latest block  <none>"),
        Err(err) => return Err(err),
    }

    match eth.block_by_selector(BlockSelector::Finalized).await {
        Ok(block) => println!("finalized     {}", block.number),
        Err(err) => println!("finalized     unavailable ({err})"),
    }

    println!("gas price     {} wei", eth.gas_price().await?);

    if let Some(address) = env::args().nth(1) {
        let balance = eth.balance(&address, BlockSelector::Latest).await?;
        let nonce = eth.transaction_count(&address, BlockSelector::Latest).await?;
        println!("balance       {balance} wei");
        println!("nonce         {nonce}");
    }

    let metrics = client.transport().metrics();
    println!(
        "rpc calls     {} ({:.1} ms avg)",
        metrics.total_requests, metrics.average_latency_ms
    );

    Ok(())
}
