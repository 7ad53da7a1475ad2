//! Wire types for the agent-to-agent task protocol.
//! JSON-RPC 2.0 envelopes, task records and the discovery card, shared by
//! any agent that speaks the protocol without depending on its skills.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod agent_card;
pub mod task;

pub use agent_card::{AgentCapabilities, AgentCard, AgentSkill};
pub use task::{
    Artifact, Message, Part, Task, TaskIdParams, TaskSendParams, TaskState, TaskStatus,
    JSON_MIME_TYPE,
};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
/// Application error: the requested task id is unknown.
pub const TASK_NOT_FOUND: i32 = -32000;

pub const METHOD_TASKS_SEND: &str = "tasks/send";
pub const METHOD_TASKS_GET: &str = "tasks/get";
pub const METHOD_TASKS_CANCEL: &str = "tasks/cancel";

/// JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    /// Echoed back verbatim; may be a number, a string or null.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

impl JsonRpcRequest {
    /// Params decoded into a method-specific shape; absent params decode as `{}`.
    pub fn params_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        let params = self.params.clone().unwrap_or_default();
        serde_json::from_value(Value::Object(params))
    }
}

/// JSON-RPC response envelope: exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn parse_error(cause: impl std::fmt::Display) -> Self {
        Self::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", cause))
    }

    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(id: Value, cause: impl std::fmt::Display) -> Self {
        Self::error(id, INVALID_PARAMS, format!("Invalid params: {}", cause))
    }

    pub fn task_not_found(id: Value) -> Self {
        Self::error(id, TASK_NOT_FOUND, "Task not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({ "method": "tasks/get" })).unwrap();
        assert_eq!(req.jsonrpc, "2.0");
        assert!(req.id.is_null());
        assert!(req.params.is_none());
    }

    #[test]
    fn test_request_requires_method() {
        let parsed = serde_json::from_value::<JsonRpcRequest>(json!({ "id": 1 }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_rejects_non_object_params() {
        let parsed = serde_json::from_value::<JsonRpcRequest>(json!({
            "id": 1,
            "method": "tasks/get",
            "params": [1, 2]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_success_omits_error() {
        let response = JsonRpcResponse::success(json!("abc"), json!({ "ok": true }));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], "abc");
        assert_eq!(value["result"]["ok"], true);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_codes() {
        let response = JsonRpcResponse::method_not_found(json!(7), "tasks/list");
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["error"]["message"], "Method not found: tasks/list");
        assert!(value.get("result").is_none());
        assert!(value["error"].get("data").is_none());

        let missing = JsonRpcResponse::task_not_found(json!(8));
        assert_eq!(missing.error.unwrap().code, TASK_NOT_FOUND);

        let parse = JsonRpcResponse::parse_error("EOF while parsing");
        assert!(parse.id.is_null());
        assert_eq!(parse.error.unwrap().code, PARSE_ERROR);
    }
}
