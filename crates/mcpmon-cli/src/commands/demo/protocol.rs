//! Line-delimited JSON protocol for the demo server
//!
//! Each input line is `{"id": .., "tool": "..", "args": {..}}`; `id` is echoed
//! back and `args` defaults to `{}`. Each output line is either
//! `{"id": .., "ok": true, "result": ..}` or
//! `{"id": .., "ok": false, "code": "..", "error": ".."}`.

use mcpmon_sdk::{MonitoredServer, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pseudo-tool listing the registered tools
pub const LIST_TOOLS: &str = "tools/list";

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub tool: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        ok: bool,
        result: Value,
    },
    Err {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        ok: bool,
        code: String,
        error: String,
    },
}

impl Response {
    fn ok(id: Option<Value>, result: Value) -> Self {
        Self::Ok {
            id,
            ok: true,
            result,
        }
    }

    fn err(id: Option<Value>, code: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Err {
            id,
            ok: false,
            code: code.into(),
            error: error.into(),
        }
    }

    fn from_tool_error(id: Option<Value>, error: &ToolError) -> Self {
        Self::err(id, error.error_code(), error.to_string())
    }
}

/// Handle one input line; `None` for blank lines
pub async fn handle_line(server: &MonitoredServer, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return Some(Response::err(None, "PARSE_ERROR", e.to_string())),
    };

    if request.tool == LIST_TOOLS {
        let tools = serde_json::to_value(server.tools()).unwrap_or(Value::Null);
        return Some(Response::ok(request.id, tools));
    }

    let response = match server.call_tool(&request.tool, request.args).await {
        Ok(result) => Response::ok(request.id, result),
        Err(e) => Response::from_tool_error(request.id, &e),
    };
    Some(response)
}
