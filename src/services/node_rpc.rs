use crate::config::Config;
use crate::error::{Result, ViewerError};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// JSON-RPC endpoints of one request: a primary node and an optional
/// fallback that is tried when the primary fails.
pub struct NodeConnections {
    http: reqwest::Client,
    primary_rpc: String,
    secondary_rpc: Option<String>,
}

pub fn create_node_connections(config: &Config) -> Result<NodeConnections> {
    info!("Connecting to Golos node {}", config.primary_rpc);
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.rpc_timeout_secs))
        .build()?;
    Ok(NodeConnections {
        http,
        primary_rpc: config.primary_rpc.clone(),
        secondary_rpc: config.secondary_rpc.clone(),
    })
}

impl NodeConnections {
    pub async fn query_rpc(&self, api: &str, method: &str, params: Value) -> Result<Value> {
        info!("Querying RPC: {}.{}", api, method);
        match call(&self.http, &self.primary_rpc, api, method, &params).await {
            Ok(response) => {
                info!("RPC query successful on primary: {}.{}", api, method);
                Ok(response)
            }
            Err(primary_error) => {
                let Some(secondary_rpc) = &self.secondary_rpc else {
                    error!("RPC {}.{} failed: {}", api, method, primary_error);
                    return Err(primary_error);
                };
                warn!("Primary RPC failed ({}), trying secondary", primary_error);
                match call(&self.http, secondary_rpc, api, method, &params).await {
                    Ok(response) => {
                        info!("RPC query successful on secondary: {}.{}", api, method);
                        Ok(response)
                    }
                    Err(e) => {
                        error!("Both RPCs failed: {:?}", e);
                        Err(e)
                    }
                }
            }
        }
    }
}

async fn call(
    http: &reqwest::Client,
    url: &str,
    api: &str,
    method: &str,
    params: &Value,
) -> Result<Value> {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "call",
        "params": [api, method, params],
    });
    let response: RpcResponse = http
        .post(url)
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    into_result(response)
}

fn into_result(response: RpcResponse) -> Result<Value> {
    match response.error {
        Some(e) => Err(ViewerError::Rpc(format!("{} (code {})", e.message, e.code))),
        None => Ok(response.result.unwrap_or(Value::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies_become_rpc_errors() {
        let response: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32003, "message": "missing required active authority"}
        }))
        .unwrap();
        match into_result(response) {
            Err(ViewerError::Rpc(message)) => {
                assert_eq!(message, "missing required active authority (code -32003)")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn results_are_unwrapped() {
        let response: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": [1, 2]})).unwrap();
        assert_eq!(into_result(response).unwrap(), json!([1, 2]));

        let response: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert_eq!(into_result(response).unwrap(), Value::Null);
    }
}
