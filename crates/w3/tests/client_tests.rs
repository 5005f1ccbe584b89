//! End-to-end tests of method constructors through the batch client

mod common;

use bytes::Bytes;
use serde_json::json;
use w3::{
    batch, eth, web3, AccessListResponse, Account, BlockNumber, Caller, Error, FilterQuery,
    Func, Log, Message, RpcError, State, Token, H256, U256,
};

use common::{addr, fixture, mock_client, C0DE, C0FE, WETH};

// ==================== Simple methods ====================

#[tokio::test]
async fn test_balance() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":"0xc0fe"}"#)]);

    let mut balance = U256::zero();
    client
        .call_one(eth::balance(addr(C0FE), None).returns(&mut balance))
        .await
        .unwrap();

    assert_eq!(balance, U256::from(49406u64));
    let sent = transport.sent_batches();
    assert_eq!(sent[0][0].method, "eth_getBalance");
    assert_eq!(
        sent[0][0].params,
        vec![json!("0x000000000000000000000000000000000000c0fe"), json!("latest")]
    );
}

#[tokio::test]
async fn test_chain_id() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":"0x1"}"#)]);

    let mut chain_id = 0u64;
    client.call_one(eth::chain_id().returns(&mut chain_id)).await.unwrap();
    assert_eq!(chain_id, 1);
}

#[tokio::test]
async fn test_gas_price_and_block_number() {
    let (client, transport) = mock_client();
    transport.set_response("eth_gasPrice", json!("0xc0fe"));
    transport.set_response("eth_blockNumber", json!("0xe4e1c0"));

    let mut gas_price = U256::zero();
    let mut block_number = U256::zero();
    client
        .call(batch![
            eth::gas_price().returns(&mut gas_price),
            eth::block_number().returns(&mut block_number),
        ])
        .await
        .unwrap();

    assert_eq!(gas_price, U256::from(0xc0feu64));
    assert_eq!(block_number, U256::from(15_000_000u64));
}

#[tokio::test]
async fn test_code() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":"0xdeadbeef"}"#)]);

    let mut code = Bytes::new();
    client
        .call_one(eth::code(addr(C0DE), None).returns(&mut code))
        .await
        .unwrap();
    assert_eq!(code, Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
}

#[tokio::test]
async fn test_storage_at() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(
        r#"{"result":"0x0000000000000000000000000000000000000000000000000000000000000042"}"#,
    )]);

    let slot = H256::from_u256(U256::one());
    let mut value = H256::ZERO;
    client
        .call_one(eth::storage_at(addr(C0DE), slot, None).returns(&mut value))
        .await
        .unwrap();
    assert_eq!(value, H256::from_u256(U256::from(0x42)));
}

#[tokio::test]
async fn test_nonce_at_block() {
    let (client, transport) = mock_client();
    transport.set_response("eth_getTransactionCount", json!("0x7"));

    let mut nonce = 0u64;
    client
        .call_one(eth::nonce(addr(C0FE), Some(BlockNumber::Number(100))).returns(&mut nonce))
        .await
        .unwrap();

    assert_eq!(nonce, 7);
    assert_eq!(transport.sent_batches()[0][0].params[1], json!("0x64"));
}

#[tokio::test]
async fn test_client_version() {
    let (client, transport) = mock_client();
    transport.set_response("web3_clientVersion", json!("Geth/v1.11.0-stable/linux-amd64/go1.20"));

    let mut version = String::new();
    client.call_one(web3::client_version().returns(&mut version)).await.unwrap();
    assert!(version.starts_with("Geth/"));
}

// ==================== Message calls ====================

#[tokio::test]
async fn test_estimate_gas() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":"0x5cc6"}"#)]);

    let msg = Message::new(addr(C0DE)).from(addr(C0FE)).value(U256::from(1));
    let mut gas = 0u64;
    client
        .call_one(eth::estimate_gas(msg, None).returns(&mut gas))
        .await
        .unwrap();

    assert_eq!(gas, 23750);
    assert_eq!(
        transport.sent_batches()[0][0].params[0],
        json!({
            "to": "0x000000000000000000000000000000000000c0de",
            "from": "0x000000000000000000000000000000000000c0fe",
            "value": "0x1"
        })
    );
}

#[tokio::test]
async fn test_access_list() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(
        r#"{"result":{"accessList":[{"address":"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2","storageKeys":["0xf68b260b81af177c0bf1a03b5d62b15aea1b486f8df26c77f33aed7538cfeb2c"]}],"gasUsed":"0x65c2"}}"#,
    )]);

    let balance_of = Func::new("balanceOf(address)", "uint256").unwrap();
    let msg = Message::new(addr(WETH)).func(balance_of, vec![Token::Address(addr(C0FE))]);
    let mut response = AccessListResponse::default();
    client
        .call_one(eth::access_list(msg, None).returns(&mut response))
        .await
        .unwrap();

    assert_eq!(response.gas_used, 26050);
    assert_eq!(response.access_list.len(), 1);
    assert_eq!(response.access_list[0].address, addr(WETH));
    assert_eq!(
        response.access_list[0].storage_keys,
        vec![H256::from_hex(
            "0xf68b260b81af177c0bf1a03b5d62b15aea1b486f8df26c77f33aed7538cfeb2c"
        )
        .unwrap()]
    );

    let params = &transport.sent_batches()[0][0].params;
    assert_eq!(
        params[0]["data"],
        json!("0x70a08231000000000000000000000000000000000000000000000000000000000000c0fe")
    );
}

#[tokio::test]
async fn test_call_omits_empty_overrides() {
    let (client, transport) = mock_client();
    transport.set_response("eth_call", json!("0x"));

    let msg = Message::new(addr(WETH)).input(vec![0x18, 0x16, 0x0d, 0xdd]);
    let mut output = Bytes::from_static(b"stale");
    client
        .call_one(eth::call(msg, None, Some(State::new())).returns(&mut output))
        .await
        .unwrap();

    assert!(output.is_empty());
    let params = &transport.sent_batches()[0][0].params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0]["data"], json!("0x18160ddd"));
}

// ==================== Contract calls ====================

fn weth_balance_of() -> eth::CallFuncFactory {
    let balance_of = Func::new("balanceOf(address)", "uint256").unwrap();
    eth::call_func(balance_of, addr(WETH), vec![Token::Address(addr(C0FE))])
}

#[tokio::test]
async fn test_call_func() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(
        r#"{"result":"0x0000000000000000000000000000000000000000000000000000000000000000"}"#,
    )]);

    let mut balance = U256::from(1);
    client
        .call_one(weth_balance_of().returns(&mut balance))
        .await
        .unwrap();
    assert_eq!(balance, U256::zero());
}

#[tokio::test]
async fn test_call_func_with_overrides() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(
        r#"{"result":"0x000000000000000000000000000000000000000000000000000000000000002a"}"#,
    )]);

    let slot = H256::from_u256(U256::from(3));
    let mut overrides = State::new();
    overrides.insert(
        addr(WETH),
        Account::default().with_storage(slot, H256::from_u256(U256::from(42))),
    );

    let mut balance = U256::zero();
    client
        .call_one(
            weth_balance_of()
                .overrides(overrides)
                .at_block(BlockNumber::Number(15_000_000))
                .returns(&mut balance),
        )
        .await
        .unwrap();

    assert_eq!(balance, U256::from(42));
    let params = &transport.sent_batches()[0][0].params;
    assert_eq!(params.len(), 3);
    assert_eq!(params[1], json!("0xe4e1c0"));
    assert_eq!(
        params[2]["0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"]["stateDiff"][slot.to_hex()],
        json!("0x000000000000000000000000000000000000000000000000000000000000002a")
    );
}

// ==================== Logs ====================

#[tokio::test]
async fn test_logs_empty() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":[]}"#)]);

    let mut logs: Vec<Log> = Vec::new();
    client
        .call_one(eth::logs(FilterQuery::new().address(addr(WETH))).returns(&mut logs))
        .await
        .unwrap();

    assert!(logs.is_empty());
    assert_eq!(
        transport.sent_batches()[0][0].params,
        vec![json!({
            "topics": [],
            "address": ["0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"],
            "fromBlock": "0x0",
            "toBlock": "latest"
        })]
    );
}

#[tokio::test]
async fn test_logs_decoded() {
    let (client, transport) = mock_client();
    transport.set_response(
        "eth_getLogs",
        json!([{
            "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "topics": ["0xe1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c"],
            "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
            "blockNumber": "0x10",
            "blockHash": "0x0000000000000000000000000000000000000000000000000000000000000010",
            "transactionHash": "0x0000000000000000000000000000000000000000000000000000000000000011",
            "transactionIndex": "0x1",
            "logIndex": "0x2",
            "removed": false
        }]),
    );

    let mut logs = Vec::new();
    client
        .call_one(eth::logs(FilterQuery::new().from_block(16).to_block(16)).returns(&mut logs))
        .await
        .unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].address, addr(WETH));
    assert_eq!(logs[0].block_number, Some(16));
    assert_eq!(logs[0].log_index, Some(2));
    assert_eq!(logs[0].data.len(), 32);
}

// ==================== Batching ====================

#[tokio::test]
async fn test_positional_routing_with_identical_payloads() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![
        fixture(r#"{"result":"0x1"}"#),
        fixture(r#"{"result":"0x1"}"#),
        fixture(r#"{"result":"0x2"}"#),
    ]);

    let mut balance = U256::zero();
    let mut chain_id = 0u64;
    let mut gas_price = U256::zero();
    client
        .call(batch![
            eth::balance(addr(C0FE), None).returns(&mut balance),
            eth::chain_id().returns(&mut chain_id),
            eth::gas_price().returns(&mut gas_price),
        ])
        .await
        .unwrap();

    assert_eq!(balance, U256::from(1));
    assert_eq!(chain_id, 1);
    assert_eq!(gas_price, U256::from(2));

    let methods: Vec<String> = transport.sent_batches()[0]
        .iter()
        .map(|r| r.method.clone())
        .collect();
    assert_eq!(methods, vec!["eth_getBalance", "eth_chainId", "eth_gasPrice"]);
}

#[tokio::test]
async fn test_construction_error_sends_nothing() {
    let (client, transport) = mock_client();
    transport.set_response("eth_chainId", json!("0x1"));

    let query = FilterQuery::new()
        .block_hash(H256::from_u256(U256::one()))
        .from_block(1);
    let mut chain_id = 0u64;
    let mut logs = Vec::new();
    let err = client
        .call(batch![
            eth::chain_id().returns(&mut chain_id),
            eth::logs(query).returns(&mut logs),
        ])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Construction(_)));
    assert!(transport.sent_batches().is_empty());
    assert_eq!(chain_id, 0);
}

#[tokio::test]
async fn test_rpc_error_is_per_call() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![
        fixture(r#"{"result":"0x1"}"#),
        fixture(r#"{"error":{"code":3,"message":"execution reverted","data":"0x08c379a0"}}"#),
    ]);

    let mut chain_id = 0u64;
    let mut output = Bytes::new();
    let err = client
        .call(batch![
            eth::chain_id().returns(&mut chain_id),
            eth::call(Message::new(addr(WETH)), None, None).returns(&mut output),
        ])
        .await
        .unwrap_err();

    assert_eq!(chain_id, 1);
    assert!(output.is_empty());
    match err {
        Error::Batch(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.get(0).is_none());
            match errors.get(1) {
                Some(Error::Rpc(rpc)) => {
                    assert_eq!(rpc.code, 3);
                    assert_eq!(rpc.message, "execution reverted");
                    assert_eq!(rpc.data, Some(json!("0x08c379a0")));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_call_one_returns_inner_error() {
    let (client, transport) = mock_client();
    transport.set_error("eth_chainId", RpcError::new(-32601, "method not found"));

    let mut chain_id = 0u64;
    let err = client
        .call_one(eth::chain_id().returns(&mut chain_id))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(err, Error::Rpc(RpcError { code: -32601, .. })));
}

#[tokio::test]
async fn test_decode_error_leaves_destination() {
    let (client, transport) = mock_client();
    transport.push_batch(vec![fixture(r#"{"result":"0x10000000000000000"}"#)]);

    let mut chain_id = 5u64;
    let err = client
        .call_one(eth::chain_id().returns(&mut chain_id))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::WireFormat(_)));
    assert!(!err.is_retryable());
    assert_eq!(chain_id, 5);
}

#[test]
fn test_create_request_is_idempotent() {
    let balance_of = Func::new("balanceOf(address)", "uint256").unwrap();
    let msg = Message::new(addr(WETH)).func(balance_of, vec![Token::Address(addr(C0FE))]);

    let mut balance = U256::zero();
    let mut gas = 0u64;
    let mut output = Bytes::new();
    let mut call_func_out = U256::zero();
    let mut logs = Vec::new();
    let callers: Vec<Box<dyn Caller + '_>> = batch![
        eth::balance(addr(C0FE), Some(BlockNumber::Safe)).returns(&mut balance),
        eth::estimate_gas(msg.clone(), None).returns(&mut gas),
        eth::call(msg, None, None).returns(&mut output),
        weth_balance_of().returns(&mut call_func_out),
        eth::logs(FilterQuery::new().topic(vec![H256::ZERO])).returns(&mut logs),
    ];

    for caller in &callers {
        assert_eq!(caller.create_request().unwrap(), caller.create_request().unwrap());
    }
}
