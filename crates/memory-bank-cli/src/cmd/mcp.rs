use crate::tools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 protocol types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ToolContent {
    r#type: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ToolCallResult {
    content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    is_error: bool,
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

pub fn run(root: &Path) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let tools = tools::all_tools();
    tracing::info!(root = %root.display(), tools = tools.len(), "memory-bank MCP server ready");

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let resp = JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32700,
                        message: format!("parse error: {e}"),
                    }),
                };
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &resp)?;
                writeln!(out)?;
                continue;
            }
        };

        // Notifications carry no "id" and get no response
        if !raw
            .as_object()
            .map(|o| o.contains_key("id"))
            .unwrap_or(false)
        {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => {
                let resp = JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: None,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32600,
                        message: format!("invalid request: {e}"),
                    }),
                };
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &resp)?;
                writeln!(out)?;
                continue;
            }
        };

        let response = handle_request(&request, &tools, root);
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Request dispatch (pub for unit tests)
// ---------------------------------------------------------------------------

pub fn handle_request(
    req: &JsonRpcRequest,
    tools: &[Box<dyn tools::MemoryBankTool>],
    root: &Path,
) -> JsonRpcResponse {
    if req.jsonrpc != "2.0" {
        return JsonRpcResponse {
            jsonrpc: "2.0",
            id: req.id.clone(),
            result: None,
            error: Some(JsonRpcError {
                code: -32600,
                message: format!("unsupported jsonrpc version: {}", req.jsonrpc),
            }),
        };
    }

    match req.method.as_str() {
        "initialize" => JsonRpcResponse {
            jsonrpc: "2.0",
            id: req.id.clone(),
            result: Some(serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "memory-bank",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            error: None,
        },

        "tools/list" => {
            let tool_list: Vec<Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.name(),
                        "title": t.title(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: req.id.clone(),
                result: Some(serde_json::json!({ "tools": tool_list })),
                error: None,
            }
        }

        "tools/call" => {
            let params = match &req.params {
                Some(p) => p,
                None => {
                    return JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "missing params".to_string(),
                        }),
                    };
                }
            };

            let tool_name = match params["name"].as_str() {
                Some(n) => n,
                None => {
                    return JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "missing tool name in params".to_string(),
                        }),
                    };
                }
            };

            let args = params.get("arguments").cloned().unwrap_or(Value::Null);

            match tools.iter().find(|t| t.name() == tool_name) {
                None => JsonRpcResponse {
                    jsonrpc: "2.0",
                    id: req.id.clone(),
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32601,
                        message: format!("tool not found: {tool_name}"),
                    }),
                },
                Some(tool) => {
                    tracing::info!(tool = tool_name, "tools/call");
                    let (text, is_error) = match tool.call(args, root) {
                        Ok(outcome) => {
                            let is_error = outcome.is_error();
                            (outcome.message, is_error)
                        }
                        Err(e) => {
                            tracing::warn!(tool = tool_name, error = %e, "tool call failed");
                            (e, true)
                        }
                    };

                    let call_result = ToolCallResult {
                        content: vec![ToolContent {
                            r#type: "text",
                            text,
                        }],
                        is_error,
                    };

                    JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: req.id.clone(),
                        result: Some(
                            serde_json::to_value(&call_result)
                                .unwrap_or_else(|e| serde_json::json!({"error": e.to_string()})),
                        ),
                        error: None,
                    }
                }
            }
        }

        other => JsonRpcResponse {
            jsonrpc: "2.0",
            id: req.id.clone(),
            result: None,
            error: Some(JsonRpcError {
                code: -32601,
                message: format!("method not found: {other}"),
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_req(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: Some(Value::Number(id.into())),
            method: method.to_string(),
            params,
        }
    }

    fn call(dir: &TempDir, id: i64, name: &str, arguments: Value) -> Value {
        let tools = tools::all_tools();
        let req = make_req(
            id,
            "tools/call",
            Some(serde_json::json!({ "name": name, "arguments": arguments })),
        );
        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.error.is_none());
        resp.result.unwrap()
    }

    #[test]
    fn initialize_returns_capabilities() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let req = make_req(
            1,
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "0.0.1"}
            })),
        );

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], "memory-bank");
    }

    #[test]
    fn tools_list_returns_all_five_modes() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let req = make_req(2, "tools/list", Some(serde_json::json!({})));

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        let tool_list = result["tools"].as_array().unwrap();
        assert_eq!(tool_list.len(), 5);

        let names: Vec<&str> = tool_list
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "van_mode",
                "plan_mode",
                "creative_mode",
                "implement_mode",
                "reflect_archive_mode"
            ]
        );
        assert_eq!(tool_list[0]["title"], "VAN Mode");
        assert_eq!(tool_list[0]["inputSchema"]["required"][0], "complexity");
    }

    #[test]
    fn tools_call_unknown_tool_returns_error() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let req = make_req(
            3,
            "tools/call",
            Some(serde_json::json!({
                "name": "nonexistent_tool",
                "arguments": {}
            })),
        );

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32601);
    }

    #[test]
    fn tools_call_van_mode_success() {
        let dir = TempDir::new().unwrap();
        let result = call(
            &dir,
            4,
            "van_mode",
            serde_json::json!({"complexity": "1", "task_description": "Fix typo"}),
        );

        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("✅ VAN Mode initialized successfully!"));
        assert!(text.contains("**Next Mode**: IMPLEMENT"));
        assert!(dir.path().join(".memory_bank/tasks.md").is_file());
    }

    #[test]
    fn tools_call_plan_without_van_is_error_result() {
        let dir = TempDir::new().unwrap();
        let result = call(&dir, 5, "plan_mode", serde_json::json!({}));

        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("❌ Error: Complexity level not found."));
    }

    #[test]
    fn tools_call_bad_arguments_is_error_result() {
        let dir = TempDir::new().unwrap();
        let result = call(&dir, 6, "van_mode", serde_json::json!({"complexity": "7"}));

        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("invalid complexity"));
    }

    #[test]
    fn full_workflow_over_mcp() {
        let dir = TempDir::new().unwrap();
        call(&dir, 1, "van_mode", serde_json::json!({"complexity": "3", "task_description": "Search"}));
        call(&dir, 2, "plan_mode", serde_json::json!({}));
        call(
            &dir,
            3,
            "creative_mode",
            serde_json::json!({
                "component_name": "indexer",
                "creative_type": "architecture",
                "requirements": "incremental updates"
            }),
        );
        call(&dir, 4, "implement_mode", serde_json::json!({}));
        call(&dir, 5, "reflect_archive_mode", serde_json::json!({"action": "reflect"}));
        let result = call(&dir, 6, "reflect_archive_mode", serde_json::json!({"action": "archive"}));
        assert_eq!(result["isError"], false);

        let tasks = std::fs::read_to_string(dir.path().join(".memory_bank/tasks.md")).unwrap();
        assert!(tasks.contains("- [x] PLAN Mode"));
        assert!(tasks.contains("- [x] CREATIVE Mode"));
        assert!(tasks.contains("- [x] IMPLEMENT Mode"));
        assert!(tasks.contains("- [x] REFLECT+ARCHIVE Mode: Completed and Archived ✅"));
        assert!(tasks.contains("Current Phase: COMPLETED"));
    }

    #[test]
    fn unknown_method_returns_method_not_found() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let req = make_req(6, "unknown/method", None);

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.result.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert!(err.message.contains("method not found"));
    }

    #[test]
    fn wrong_jsonrpc_version_is_invalid_request() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let mut req = make_req(8, "tools/list", None);
        req.jsonrpc = "1.0".into();

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.result.is_none());
        assert_eq!(resp.id, Some(Value::Number(8.into())));
        assert_eq!(resp.error.unwrap().code, -32600);
    }

    #[test]
    fn tools_call_missing_params_returns_error() {
        let dir = TempDir::new().unwrap();
        let tools = tools::all_tools();
        let req = make_req(7, "tools/call", None);

        let resp = handle_request(&req, &tools, dir.path());
        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, -32602);
    }
}
