use std::time::Duration;

use crate::support::{
    helpers::{
        block_json, init_tracing, log_json, receipt_json, start_node, test_config,
        transaction_json, BOR_VERSION, GETH_VERSION,
    },
    mock_rpc::{MockNode, MockRpcServer},
};
use anyhow::Result;
use evmrpc::{BlockSelector, EthError, EvmClient, LogFilter, TopicFilter};
use num_bigint::BigUint;
use serde_json::{json, Value};

const ACCOUNT: &str = "0x407d73d8a49eeb85d32cf465507dd71d507100c1";
const TOKEN: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

#[tokio::test]
async fn connect_resolves_chain_id_from_node() -> Result<()> {
    init_tracing();
    let node = MockNode::new(GETH_VERSION);
    node.set_result("eth_chainId", json!("0x89"));
    let server = MockRpcServer::start(node.clone()).await?;

    let client = EvmClient::connect(&test_config(server.url(), None)?).await?;

    assert_eq!(client.chain_id(), 137);
    assert_eq!(node.methods(), vec!["eth_chainId"]);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn connect_fails_on_malformed_chain_id() -> Result<()> {
    init_tracing();
    let node = MockNode::new(GETH_VERSION);
    node.set_result("eth_chainId", json!("0x"));
    let server = MockRpcServer::start(node).await?;

    let err = match EvmClient::connect(&test_config(server.url(), None)?).await {
        Ok(_) => panic!("malformed chain id must fail"),
        Err(err) => err,
    };
    assert!(matches!(
        err.downcast_ref::<EthError>(),
        Some(EthError::MalformedHex { .. })
    ));
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn account_reads_encode_selectors() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_getBalance", json!("0x234c8a3397aab58"))
        .set_result("eth_getTransactionCount", json!("0x1"))
        .set_result("eth_getCode", json!("0x600160008035811a818181146012578301005b"))
        .set_result(
            "eth_getStorageAt",
            json!("0x00000000000000000000000000000000000000000000000000000000000004d2"),
        );
    let eth = client.eth();

    assert_eq!(
        eth.balance(ACCOUNT, BlockSelector::Latest).await?,
        BigUint::from(158_972_490_234_375_000u64)
    );
    assert_eq!(
        eth.transaction_count(ACCOUNT, BlockSelector::Number(100)).await?,
        1
    );
    assert_eq!(
        eth.code(ACCOUNT, BlockSelector::Earliest).await?,
        "0x600160008035811a818181146012578301005b"
    );
    eth.storage_at(ACCOUNT, "0x0", BlockSelector::Finalized)
        .await?;

    assert_eq!(node.params_of("eth_getBalance"), vec![json!([ACCOUNT, "latest"])]);
    assert_eq!(
        node.params_of("eth_getTransactionCount"),
        vec![json!([ACCOUNT, "0x64"])]
    );
    assert_eq!(node.params_of("eth_getCode"), vec![json!([ACCOUNT, "earliest"])]);
    assert_eq!(
        node.params_of("eth_getStorageAt"),
        vec![json!([ACCOUNT, "0x0", "finalized"])]
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn empty_balance_reads_as_zero() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_getBalance", json!(""));

    let balance = client.eth().balance(ACCOUNT, BlockSelector::Safe).await?;
    assert_eq!(balance, BigUint::from(0u8));
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn fee_and_tip_reads() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_blockNumber", json!("0x14a8c3f"))
        .set_result("eth_gasPrice", json!("0x4a817c800"))
        .set_result("eth_maxPriorityFeePerGas", json!("0x3b9aca00"));
    let eth = client.eth();

    assert_eq!(eth.block_number().await?, 21_662_783);
    assert_eq!(eth.gas_price().await?, BigUint::from(20_000_000_000u64));
    assert_eq!(
        eth.max_priority_fee_per_gas().await?,
        BigUint::from(1_000_000_000u64)
    );
    assert_eq!(node.params_of("eth_gasPrice"), vec![json!([])]);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn block_lookups_decode_both_shapes() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    let eth = client.eth();

    node.set_result("eth_getBlockByNumber", block_json(42, json!(["0xaa", "0xbb"])));
    let block = eth.block_by_number(42).await?;
    assert_eq!(block.number, 42);
    assert_eq!(block.transaction_count(), 2);

    node.set_result(
        "eth_getBlockByNumber",
        block_json(43, json!([transaction_json("0xcc", 43)])),
    );
    let block = eth.block_by_selector_full(BlockSelector::Latest).await?;
    assert_eq!(block.transactions[0].hash, "0xcc");
    assert_eq!(
        block.transactions[0].value,
        BigUint::from(1_000_000_000_000_000_000u64)
    );

    node.set_result("eth_getBlockByHash", block_json(44, json!([])));
    let hash = format!("0x{:064x}", 44);
    let block = eth.block_by_hash(&hash).await?;
    assert_eq!(block.hash, hash);

    assert_eq!(
        node.params_of("eth_getBlockByNumber"),
        vec![json!(["0x2a", false]), json!(["latest", true])]
    );
    assert_eq!(node.params_of("eth_getBlockByHash"), vec![json!([hash, false])]);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn pending_block_never_reaches_node() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;

    let err = client
        .eth()
        .block_by_selector(BlockSelector::Pending)
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<EthError>(),
        Some(&EthError::PendingBlockUnsupported)
    );
    assert!(node.calls().is_empty());
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn null_lookups_are_not_found() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_getBlockByHash", Value::Null)
        .set_result("eth_getTransactionByHash", Value::Null)
        .set_result("eth_getTransactionReceipt", Value::Null);
    let eth = client.eth();

    let err = eth.block_by_hash("0x01").await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<EthError>(),
        Some(&EthError::NotFound {
            method: "eth_getBlockByHash"
        })
    );
    assert!(EthError::is_not_found(&eth.transaction("0x02").await.unwrap_err()));
    assert!(EthError::is_not_found(
        &eth.transaction_receipt("0x03").await.unwrap_err()
    ));
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn transaction_and_receipt_decode() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_getTransactionByHash", transaction_json("0xabc", 9))
        .set_result("eth_getTransactionReceipt", receipt_json("0xabc", 9));
    let eth = client.eth();

    let tx = eth.transaction("0xabc").await?;
    assert_eq!(tx.block_number, Some(9));
    assert_eq!(tx.max_fee_per_gas, Some(BigUint::from(2_000_000_000u64)));

    let receipt = eth.transaction_receipt("0xabc").await?;
    assert!(receipt.succeeded());
    assert_eq!(receipt.gas_used, 21_000);
    assert_eq!(node.params_of("eth_getTransactionReceipt"), vec![json!(["0xabc"])]);
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn bor_node_serves_block_receipts_under_its_own_name() -> Result<()> {
    let (node, server, client) = start_node(BOR_VERSION).await?;
    node.set_result(
        "eth_getTransactionReceiptsByBlock",
        json!([receipt_json("0x01", 5), receipt_json("0x02", 5)]),
    );
    let eth = client.eth();

    assert_eq!(eth.block_receipts(5).await?.len(), 2);
    assert_eq!(eth.block_receipts(5).await?.len(), 2);

    assert_eq!(
        node.methods(),
        vec![
            "web3_clientVersion",
            "eth_getTransactionReceiptsByBlock",
            "eth_getTransactionReceiptsByBlock",
        ]
    );
    assert_eq!(
        node.params_of("eth_getTransactionReceiptsByBlock")[0],
        json!(["0x5"])
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn geth_node_uses_canonical_block_receipts() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_getBlockReceipts", json!([receipt_json("0x01", 6)]));

    let receipts = client.eth().block_receipts(6).await?;
    assert_eq!(receipts[0].block_number, 6);
    assert_eq!(
        node.methods(),
        vec!["web3_clientVersion", "eth_getBlockReceipts"]
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn disabled_client_version_falls_back_to_canonical_block_receipts() -> Result<()> {
    init_tracing();
    let node = MockNode::default();
    node.set_result("eth_getBlockReceipts", json!([receipt_json("0x01", 7)]));
    let server = MockRpcServer::start(node.clone()).await?;
    let client = EvmClient::connect(&test_config(server.url(), Some(1))?).await?;

    let receipts = client.eth().block_receipts(7).await?;
    assert_eq!(receipts.len(), 1);
    assert_eq!(
        node.methods(),
        vec!["web3_clientVersion", "eth_getBlockReceipts"]
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn log_queries_send_one_keyed_object() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result(
        "eth_getLogs",
        json!([log_json(TOKEN, 100, 0), log_json(TOKEN, 101, 1)]),
    );
    let eth = client.eth();

    let filter = LogFilter::range(100, 101)
        .address(TOKEN)
        .topic(TopicFilter::Exact(
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
        ))
        .topic(TopicFilter::Any)
        .topic(TopicFilter::OneOf(vec![
            format!("0x{:064x}", 1),
            format!("0x{:064x}", 2),
        ]));
    let logs = eth.logs(&filter).await?;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].log_index, Some(1));

    eth.logs_by_block_hash("0xfeed").await?;
    eth.logs_by_block_number(100).await?;

    assert_eq!(
        node.params_of("eth_getLogs"),
        vec![
            json!([{
                "fromBlock": "0x64",
                "toBlock": "0x65",
                "address": TOKEN,
                "topics": [
                    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                    null,
                    [format!("0x{:064x}", 1), format!("0x{:064x}", 2)]
                ]
            }]),
            json!([{ "blockHash": "0xfeed" }]),
            json!([{ "fromBlock": "0x64", "toBlock": "0x64" }]),
        ]
    );
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn incomplete_log_range_never_reaches_node() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;

    let filter = LogFilter {
        to_block: Some(10),
        ..LogFilter::default()
    };
    let err = client.eth().logs(&filter).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<EthError>(),
        Some(&EthError::IncompleteBlockRange)
    );
    assert!(node.calls().is_empty());
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn remote_errors_pass_through() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_error("eth_getLogs", -32005, "query returned more than 10000 results");

    let err = client.eth().logs_by_block_number(1).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("-32005"));
    assert!(message.contains("more than 10000 results"));
    assert!(err.downcast_ref::<EthError>().is_none());
    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn concurrent_calls_share_one_client() -> Result<()> {
    let (node, server, client) = start_node(GETH_VERSION).await?;
    node.set_result("eth_gasPrice", json!("0x1"))
        .set_delay("eth_gasPrice", Duration::from_millis(20));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.eth().gas_price().await }));
    }
    for handle in handles {
        assert_eq!(handle.await??, BigUint::from(1u8));
    }
    assert_eq!(node.params_of("eth_gasPrice").len(), 8);
    server.shutdown().await;
    Ok(())
}
