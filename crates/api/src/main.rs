use abiprobe_core::{
    Abi, FunctionMatch, ProbeConfig, ScanStrategy, decoder::normalize_hex_string,
    satisfy::check_functions,
};
use abiprobe_utils::errors::{ConfigError, MissingInput, SatisfyError};
use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, Serialize)]
struct SignatureRequest {
    /// ABI as a function object or an array of them
    #[serde(default)]
    abi: Value,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
struct FunctionSignature {
    signature: String,
    selector: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct SatisfiesRequest {
    /// Runtime bytecode as hex string (with or without 0x prefix)
    #[serde(default)]
    bytecode: Option<String>,
    /// ABI as a function object or an array of them
    #[serde(default)]
    abi: Value,
    /// Overrides the server's scan strategy for this request
    scan: Option<ScanStrategy>,
}

#[derive(Debug, Deserialize, Serialize)]
struct SatisfiesResponse {
    /// True when every function is dispatched
    satisfied: bool,
    /// Per-function outcome, in ABI order
    functions: Vec<FunctionMatch>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

type ApiError = (StatusCode, ResponseJson<ErrorResponse>);

fn bad_request(error: &str, details: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        ResponseJson(ErrorResponse {
            error: error.to_string(),
            details: Some(details.to_string()),
        }),
    )
}

fn input_error(e: SatisfyError) -> ApiError {
    warn!("rejected request: {}", e);
    match e {
        SatisfyError::MissingInput(_) => bad_request("Missing input", e),
        _ => bad_request("Invalid ABI", e),
    }
}

/// Builds the router with its middleware stack.
fn app(config: ProbeConfig) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/signature", post(signatures))
        .route("/satisfies", post(satisfies))
        .with_state(Arc::new(config))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Reads the configuration file at `path`, or the defaults when there is none.
fn load_config_from(path: Option<&str>) -> Result<ProbeConfig, ConfigError> {
    match path {
        Some(path) => {
            info!("loading config from {}", path);
            ProbeConfig::from_file(path)
        }
        None => Ok(ProbeConfig::default()),
    }
}

/// Reads the configuration named by `ABIPROBE_CONFIG`, if set.
fn load_config() -> Result<ProbeConfig, ConfigError> {
    load_config_from(std::env::var("ABIPROBE_CONFIG").ok().as_deref())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("abiprobe API server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(config)).await?;
    Ok(())
}

async fn health_check(State(config): State<Arc<ProbeConfig>>) -> ResponseJson<Value> {
    ResponseJson(serde_json::json!({
        "status": "healthy",
        "service": "abiprobe-api",
        "version": env!("CARGO_PKG_VERSION"),
        "scan": config.scan,
    }))
}

async fn signatures(
    Json(request): Json<SignatureRequest>,
) -> Result<ResponseJson<Vec<FunctionSignature>>, ApiError> {
    let abi = Abi::from_json(&request.abi).map_err(input_error)?;
    Ok(ResponseJson(
        abi.iter()
            .map(|spec| FunctionSignature {
                signature: spec.signature(),
                selector: spec.selector().to_string(),
            })
            .collect(),
    ))
}

async fn satisfies(
    State(config): State<Arc<ProbeConfig>>,
    Json(request): Json<SatisfiesRequest>,
) -> Result<ResponseJson<SatisfiesResponse>, ApiError> {
    let raw = request.bytecode.unwrap_or_default();
    info!(
        "Received satisfaction request for bytecode: {}",
        raw.chars().take(20).collect::<String>()
    );

    let bytecode = normalize_hex_string(&raw)
        .map_err(|e| bad_request("Invalid hex bytecode", e))?;
    if bytecode.is_empty() {
        return Err(input_error(SatisfyError::MissingInput(MissingInput::Bytecode)));
    }

    let abi = Abi::from_json(&request.abi).map_err(input_error)?;
    let scan = request.scan.unwrap_or(config.scan);
    let functions = check_functions(&bytecode, &abi, scan).map_err(input_error)?;
    let satisfied = functions.iter().all(|f| f.matched);

    info!(
        "{} function(s) checked against {} bytes, satisfied: {}",
        functions.len(),
        bytecode.len() / 2,
        satisfied
    );
    Ok(ResponseJson(SatisfiesResponse {
        satisfied,
        functions,
    }))
}
