use std::time::{Duration, Instant};

use crate::support::{
    helpers::{init_tracing, start_node, BOR_VERSION, GETH_VERSION},
    mock_rpc::{MockNode, MockRpcServer},
};
use anyhow::Result;
use evmrpc::{ClientConfig, EvmClient, HttpTransport, RpcClientOptions, RpcError, Transport};
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn cancellation_interrupts_outstanding_call() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_blockNumber", json!("0x1"))
        .set_delay("eth_blockNumber", Duration::from_secs(5));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = client
        .eth()
        .block_number_with_cancel(&cancel)
        .await
        .unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(
        err.downcast_ref::<RpcError>(),
        Some(RpcError::Cancelled {
            method: "eth_blockNumber"
        })
    ));
    assert_eq!(client.transport().metrics().total_cancellations, 1);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn slow_node_times_out() -> Result<()> {
    init_tracing();
    let node = MockNode::new(GETH_VERSION);
    node.set_result("eth_gasPrice", json!("0x1"))
        .set_delay("eth_gasPrice", Duration::from_secs(5));
    let server = MockRpcServer::start(node).await?;
    let config = ClientConfig::builder()
        .rpc_url(server.url())
        .chain_id(1)
        .request_timeout(Duration::from_millis(100))
        .build()?;
    let client = EvmClient::connect(&config).await?;

    let err = client.eth().gas_price().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RpcError>(),
        Some(RpcError::Timeout {
            method: "eth_gasPrice"
        })
    ));
    assert_eq!(client.transport().metrics().total_timeouts, 1);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn node_client_is_parsed_and_cached() -> Result<()> {
    let (node, server, client) = start_node(BOR_VERSION).await?;
    let cancel = CancellationToken::new();

    assert_eq!(client.transport().node_client(&cancel).await?, "bor");
    assert_eq!(client.transport().node_client(&cancel).await?, "bor");
    assert_eq!(node.methods(), vec!["web3_clientVersion"]);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn basic_auth_header_is_sent() -> Result<()> {
    init_tracing();
    let node = MockNode::new(GETH_VERSION);
    node.set_result("eth_chainId", json!("0x1"));
    let server = MockRpcServer::start(node.clone()).await?;
    let config = ClientConfig::builder()
        .rpc_url(server.url())
        .rpc_user("node")
        .rpc_password("secret")
        .build()?;

    EvmClient::connect(&config).await?;

    let calls = node.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].authorization.as_deref(),
        Some("Basic bm9kZTpzZWNyZXQ=")
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn metrics_track_successes_and_failures() -> Result<()> {
    init_tracing();
    let node = MockNode::new(GETH_VERSION);
    node.set_result("eth_chainId", json!("0x1"))
        .set_error("eth_getCode", -32602, "invalid argument 0");
    let server = MockRpcServer::start(node).await?;
    let transport = HttpTransport::with_options(server.url(), RpcClientOptions::default())?;
    let cancel = CancellationToken::new();

    transport.call(&cancel, "eth_chainId", Vec::new()).await?;
    assert!(transport
        .call(&cancel, "eth_getCode", vec![json!("0x00")])
        .await
        .is_err());

    let snapshot = transport.metrics();
    assert_eq!(snapshot.total_requests, 2);
    assert_eq!(snapshot.total_errors, 1);
    server.shutdown().await;
    Ok(())
}
