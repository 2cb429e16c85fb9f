use abiprobe_core::{
    Abi, Address, CodeProvider, JsonRpcProvider, RpcConfig, RpcError, address_satisfies,
    parse_address,
};
use abiprobe_tests::{SAMPLE_RUNTIME, combined_abi, invalid_abis, valid_abis};
use abiprobe_utils::errors::{MissingInput, ResolveError, SatisfyError};
use async_trait::async_trait;
use axum::{Json, Router, routing::post};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

const SAMPLE: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";
const EMPTY_ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

#[derive(Debug, thiserror::Error)]
#[error("no such account")]
struct UnknownAccount;

/// In-memory chain state that counts code fetches.
struct MemoryChain {
    code: HashMap<Address, String>,
    fetches: AtomicUsize,
}

impl MemoryChain {
    fn new() -> Self {
        let mut code = HashMap::new();
        code.insert(parse_address(SAMPLE).unwrap(), SAMPLE_RUNTIME.to_string());
        code.insert(parse_address(EMPTY_ACCOUNT).unwrap(), "0x".to_string());
        Self {
            code,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CodeProvider for MemoryChain {
    type Error = UnknownAccount;

    async fn get_code(&self, address: &Address) -> Result<String, UnknownAccount> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.code.get(address).cloned().ok_or(UnknownAccount)
    }
}

#[tokio::test]
async fn test_address_satisfies_sample_functions() -> anyhow::Result<()> {
    let chain = MemoryChain::new();

    for abi in valid_abis() {
        assert!(address_satisfies(&chain, SAMPLE, &Abi::from_json(&abi)?).await?);
    }
    assert!(address_satisfies(&chain, SAMPLE, &combined_abi()).await?);
    for abi in invalid_abis() {
        assert!(!address_satisfies(&chain, SAMPLE, &Abi::from_json(&abi)?).await?);
    }

    assert_eq!(chain.fetches.load(Ordering::SeqCst), 13);
    Ok(())
}

#[tokio::test]
async fn test_lowercase_address_resolves_the_same_account() -> anyhow::Result<()> {
    let chain = MemoryChain::new();
    let lower = SAMPLE.to_lowercase();
    assert!(address_satisfies(&chain, &lower, &combined_abi()).await?);
    Ok(())
}

#[tokio::test]
async fn test_address_failures() {
    let chain = MemoryChain::new();
    let abi = combined_abi();

    let err = address_satisfies(&chain, "0xdbf03b407c01e7cd3cbea99509d93f8ddd", &abi)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Satisfy(SatisfyError::InvalidAddress(_))));
    assert_eq!(chain.fetches.load(Ordering::SeqCst), 0);

    let err = address_satisfies(&chain, "0x0000000000000000000000000000000000000001", &abi)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Provider(UnknownAccount)));

    let err = address_satisfies(&chain, EMPTY_ACCOUNT, &abi).await.unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Satisfy(SatisfyError::MissingInput(MissingInput::Bytecode))
    ));
}

/// Starts a node that serves `SAMPLE_RUNTIME` for every `eth_getCode` call.
async fn spawn_node() -> std::net::SocketAddr {
    let app = Router::new().route(
        "/",
        post(|Json(request): Json<Value>| async move {
            let reply = if request["method"] == "eth_getCode" {
                json!({ "jsonrpc": "2.0", "id": request["id"], "result": SAMPLE_RUNTIME })
            } else {
                json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "error": { "code": -32601, "message": "method not found" }
                })
            };
            Json(reply)
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_json_rpc_end_to_end() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let addr = spawn_node().await;
    let provider = JsonRpcProvider::new(RpcConfig::with_endpoint(format!("http://{addr}")))?;

    assert!(address_satisfies(&provider, SAMPLE, &combined_abi()).await?);
    for abi in invalid_abis() {
        assert!(!address_satisfies(&provider, SAMPLE, &Abi::from_json(&abi)?).await?);
    }
    Ok(())
}

#[tokio::test]
async fn test_json_rpc_unreachable_node() {
    let provider = JsonRpcProvider::new(RpcConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..RpcConfig::default()
    })
    .unwrap();

    let err = address_satisfies(&provider, SAMPLE, &combined_abi())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Provider(RpcError::Provider(_) | RpcError::Timeout(_))
    ));
}
