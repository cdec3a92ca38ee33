//! JSON-RPC 2.0 envelopes for Odoo's `/jsonrpc` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound `call` request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: CallParams<'a>,
    id: String,
}

#[derive(Debug, Serialize)]
struct CallParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Vec<Value>,
}

impl<'a> RpcRequest<'a> {
    /// Invoke `service.method(*args)`, tagged with a fresh request id.
    pub fn call(service: &'a str, method: &'a str, args: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params: CallParams { service, method, args },
            id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Inbound response; exactly one of `result` and `error` is normally set.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFault>,
}

/// JSON-RPC error object as produced by Odoo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcFault {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<FaultData>,
}

/// Server-side exception details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaultData {
    /// Fully qualified exception class, e.g. `odoo.exceptions.ValidationError`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub debug: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_envelope_shape() {
        let request = RpcRequest::call("common", "version", vec![]);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "call");
        assert_eq!(body["params"], json!({"service": "common", "method": "version", "args": []}));
        assert_eq!(body["id"], json!(request.id()));
    }

    #[test]
    fn fault_parses_exception_details() {
        let response: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {"name": "odoo.exceptions.UserError", "message": "No way", "debug": "Traceback"}
            }
        }))
        .unwrap();

        let fault = response.error.unwrap();
        assert_eq!(fault.code, 200);
        let data = fault.data.unwrap();
        assert_eq!(data.name, "odoo.exceptions.UserError");
        assert_eq!(data.message, "No way");
        assert!(response.result.is_none());
    }
}
