//! MCP server over newline-delimited JSON-RPC
//!
//! Requests are read one line at a time. `tools/call` runs on its own task so
//! that a slow remote call does not hold up `ping` or a cancellation; every
//! other method is answered inline. All responses go through a single writer
//! task, so output lines never interleave. A bad line or a panicking call is
//! answered with an error and the loop keeps reading.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use exa_tools::{ToolError, ToolRegistry};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tokio::task::{self, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::MCPError;
use crate::protocol::{
    CallToolParams, CancelledParams, InitializeParams, InitializeResult, JsonRpcRequest,
    JsonRpcResponse, MCPServerInfo, MCPToolDefinition, MCPToolResult, codes, negotiate_version,
};

const TOOLS_CALL: &str = "tools/call";

/// MCP server dispatching to a fixed tool registry
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: MCPServerInfo,
    /// Cancellation handles of running `tools/call` requests, keyed by request id
    in_flight: Mutex<HashMap<String, CancellationToken>>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            info: MCPServerInfo::default(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve until `reader` reaches EOF
    ///
    /// In-flight tool calls are allowed to finish before returning.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(64);

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let mut line = serde_json::to_vec(&response)?;
                line.push(b'\n');
                writer.write_all(&line).await?;
                writer.flush().await?;
            }
            Ok::<(), MCPError>(())
        });

        info!(tools = self.registry.len(), "MCP server ready");

        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        let mut calls = JoinSet::new();
        let mut call_ids: HashMap<task::Id, Value> = HashMap::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let request = match Self::decode(&line) {
                Ok(request) => request,
                Err(response) => {
                    send(&tx, response).await;
                    continue;
                }
            };

            match self.begin_tool_call(&request).await {
                Some(CallStart::Started(id, token)) => {
                    let server = Arc::clone(&self);
                    let tx = tx.clone();
                    let request_id = id.clone();
                    let handle = calls.spawn(async move {
                        if let Some(response) = server.call_tool(id, request.params, token).await {
                            send(&tx, response).await;
                        }
                    });
                    call_ids.insert(handle.id(), request_id);
                }
                Some(CallStart::Rejected(response)) => send(&tx, response).await,
                None => {
                    if let Some(response) = self.handle_message(request).await {
                        send(&tx, response).await;
                    }
                }
            }

            while let Some(finished) = calls.try_join_next_with_id() {
                self.finish_call(finished, &mut call_ids, &tx).await;
            }
        }

        debug!(in_flight = calls.len(), "Input closed");
        while let Some(finished) = calls.join_next_with_id().await {
            self.finish_call(finished, &mut call_ids, &tx).await;
        }

        drop(tx);
        writer_task.await??;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one message and produce its response
    ///
    /// Returns `None` for notifications and for cancelled tool calls.
    pub async fn handle_message(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        match self.begin_tool_call(&request).await {
            Some(CallStart::Started(id, token)) => {
                return self.call_tool(id, request.params, token).await;
            }
            Some(CallStart::Rejected(response)) => return Some(response),
            None => {}
        }

        if request.jsonrpc != "2.0" {
            return request.id.map(|id| {
                JsonRpcResponse::failure(id, codes::INVALID_REQUEST, "jsonrpc must be \"2.0\"")
            });
        }

        let Some(id) = request.id else {
            self.handle_notification(&request.method, request.params).await;
            return None;
        };

        debug!(method = %request.method, "Handling request");

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.list_tools(id),
            other => JsonRpcResponse::failure(
                id,
                codes::METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn decode(line: &[u8]) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
        let value: Value = serde_json::from_slice(line).map_err(|e| {
            warn!(error = %e, "Unparsable message");
            JsonRpcResponse::failure(Value::Null, codes::PARSE_ERROR, format!("parse error: {e}"))
        })?;

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| {
            JsonRpcResponse::failure(id, codes::INVALID_REQUEST, format!("invalid request: {e}"))
        })
    }

    /// Register a cancellation handle when `request` is a tool call
    ///
    /// An id that is still in flight is rejected rather than replacing the
    /// running call's handle.
    async fn begin_tool_call(&self, request: &JsonRpcRequest) -> Option<CallStart> {
        if request.jsonrpc != "2.0" || request.method != TOOLS_CALL {
            return None;
        }
        let id = request.id.clone()?;

        let mut in_flight = self.in_flight.lock().await;
        match in_flight.entry(request_key(&id)) {
            Entry::Occupied(_) => {
                warn!(request_id = %id, "Duplicate tool call id");
                Some(CallStart::Rejected(JsonRpcResponse::failure(
                    id,
                    codes::INVALID_REQUEST,
                    "request id already in flight",
                )))
            }
            Entry::Vacant(slot) => {
                let token = CancellationToken::new();
                slot.insert(token.clone());
                Some(CallStart::Started(id, token))
            }
        }
    }

    /// Settle a joined tool call task
    ///
    /// A task that panicked never answered, so its id is released and the
    /// client gets an internal error instead.
    async fn finish_call(
        &self,
        finished: std::result::Result<(task::Id, ()), JoinError>,
        call_ids: &mut HashMap<task::Id, Value>,
        tx: &mpsc::Sender<JsonRpcResponse>,
    ) {
        let e = match finished {
            Ok((task_id, ())) => {
                call_ids.remove(&task_id);
                return;
            }
            Err(e) => e,
        };

        let Some(id) = call_ids.remove(&e.id()) else {
            warn!(error = %e, "Tool call task failed");
            return;
        };
        warn!(request_id = %id, error = %e, "Tool call task failed");
        self.in_flight.lock().await.remove(&request_key(&id));
        send(
            tx,
            JsonRpcResponse::failure(id, codes::INTERNAL_ERROR, "tool call failed"),
        )
        .await;
    }

    async fn handle_notification(&self, method: &str, params: Option<Value>) {
        match method {
            "notifications/initialized" => debug!("Client initialized"),
            "notifications/cancelled" => {
                let Some(params) = params
                    .and_then(|p| serde_json::from_value::<CancelledParams>(p).ok())
                else {
                    warn!("Ignoring cancellation without a requestId");
                    return;
                };

                let token = self.in_flight.lock().await.remove(&request_key(&params.request_id));
                match token {
                    Some(token) => {
                        info!(
                            request_id = %params.request_id,
                            reason = params.reason.as_deref().unwrap_or(""),
                            "Cancelling tool call"
                        );
                        token.cancel();
                    }
                    None => debug!(request_id = %params.request_id, "No such call in flight"),
                }
            }
            other => debug!(method = other, "Ignoring notification"),
        }
    }

    fn initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let result = InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            capabilities: json!({"tools": {"listChanged": false}}),
            server_info: self.info.clone(),
        };
        info!(protocol_version = %result.protocol_version, "Client connected");

        to_response(id, &result)
    }

    fn list_tools(&self, id: Value) -> JsonRpcResponse {
        let tools: Vec<MCPToolDefinition> = self
            .registry
            .list_tools()
            .iter()
            .map(|tool| MCPToolDefinition::from_tool(tool.as_ref()))
            .collect();
        to_response(id, &json!({ "tools": tools }))
    }

    async fn call_tool(
        &self,
        id: Value,
        params: Option<Value>,
        token: CancellationToken,
    ) -> Option<JsonRpcResponse> {
        let outcome = tokio::select! {
            () = token.cancelled() => None,
            response = self.run_tool(id.clone(), params) => Some(response),
        };

        self.in_flight.lock().await.remove(&request_key(&id));
        if outcome.is_none() {
            debug!(request_id = %id, "Tool call dropped after cancellation");
        }
        outcome
    }

    async fn run_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return JsonRpcResponse::failure(
                    id,
                    codes::INVALID_PARAMS,
                    "missing tools/call parameters",
                );
            }
            Err(e) => {
                return JsonRpcResponse::failure(
                    id,
                    codes::INVALID_PARAMS,
                    format!("invalid tools/call parameters: {e}"),
                );
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::failure(
                id,
                codes::INVALID_PARAMS,
                ToolError::NotFound(params.name).to_string(),
            );
        };

        debug!(tool = %params.name, "Calling tool");

        let result = match tool.execute(params.arguments).await {
            Ok(output) => MCPToolResult::success(output),
            Err(e) if e.is_invalid_request() => {
                return JsonRpcResponse::failure(id, codes::INVALID_PARAMS, e.to_string());
            }
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                MCPToolResult::error(e.to_string())
            }
        };

        to_response(id, &result)
    }
}

/// Outcome of registering a `tools/call`
enum CallStart {
    Started(Value, CancellationToken),
    Rejected(JsonRpcResponse),
}

fn request_key(id: &Value) -> String {
    id.to_string()
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::failure(id, codes::INTERNAL_ERROR, e.to_string()),
    }
}

async fn send(tx: &mpsc::Sender<JsonRpcResponse>, response: JsonRpcResponse) {
    if tx.send(response).await.is_err() {
        warn!("Output closed; dropping response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PROTOCOL_VERSION;
    use crate::tools::default_registry;
    use crate::tools::testing::{FailingFactory, MockExa, factory};
    use async_trait::async_trait;
    use exa_client::{OptField, ResultItem, SearchResponse};
    use exa_tools::{Tool, ToolOutput};
    use tokio::io::AsyncReadExt;

    fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }

    fn server_with(mock: MockExa) -> McpServer {
        McpServer::new(Arc::new(default_registry(factory(mock)).unwrap()))
    }

    fn searching_mock() -> MockExa {
        let mut mock = MockExa::new();
        mock.expect_search().returning(|_| {
            Ok(SearchResponse {
                results: vec![ResultItem {
                    title: OptField::Set("Tokio".into()),
                    url: OptField::Set("https://tokio.rs".into()),
                    ..ResultItem::default()
                }],
                ..SearchResponse::default()
            })
        });
        mock
    }

    /// Tool that never finishes on its own
    struct Stall;

    #[async_trait]
    impl Tool for Stall {
        async fn execute(&self, _params: Value) -> exa_tools::Result<ToolOutput> {
            std::future::pending().await
        }

        fn name(&self) -> &str {
            "stall"
        }

        fn description(&self) -> &str {
            "Never returns"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    /// Tool whose task panics
    struct Crash;

    #[async_trait]
    impl Tool for Crash {
        async fn execute(&self, _params: Value) -> exa_tools::Result<ToolOutput> {
            panic!("tool crashed")
        }

        fn name(&self) -> &str {
            "crash"
        }

        fn description(&self) -> &str {
            "Always panics"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    async fn serve_bytes(server: Arc<McpServer>, input: &[u8]) -> Vec<Value> {
        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        server.serve(input, writer).await.unwrap();

        let mut written = String::new();
        output.read_to_string(&mut written).await.unwrap();
        written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server_with(MockExa::new());
        let response = server
            .handle_message(request(
                Some(json!(1)),
                "initialize",
                Some(json!({"protocolVersion": "2024-11-05", "capabilities": {}})),
            ))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "exa-mcp-server");
        assert_eq!(result["serverInfo"]["title"], "Exa MCP Server");

        let response = server
            .handle_message(request(Some(json!(2)), "initialize", None))
            .await
            .unwrap();
        assert_eq!(response.result.unwrap()["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let server = server_with(MockExa::new());
        assert!(
            server
                .handle_message(request(None, "notifications/initialized", None))
                .await
                .is_none()
        );
        assert!(
            server
                .handle_message(request(
                    None,
                    "notifications/cancelled",
                    Some(json!({"requestId": 99}))
                ))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_ping_and_unknown_method() {
        let server = server_with(MockExa::new());

        let pong = server
            .handle_message(request(Some(json!("a")), "ping", None))
            .await
            .unwrap();
        assert_eq!(pong.id, json!("a"));
        assert_eq!(pong.result, Some(json!({})));

        let missing = server
            .handle_message(request(Some(json!(3)), "resources/list", None))
            .await
            .unwrap();
        assert_eq!(missing.error.unwrap().code, codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tools_list_sorted_with_titles() {
        let server = server_with(MockExa::new());
        let response = server
            .handle_message(request(Some(json!(1)), "tools/list", None))
            .await
            .unwrap();

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["answer", "find_similar", "get_contents", "search"]);

        let search = &tools[3];
        assert_eq!(search["title"], "Exa Search");
        assert_eq!(search["annotations"]["title"], "Exa Search");
        assert_eq!(search["inputSchema"]["required"], json!(["query"]));
        assert!(search["outputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let server = server_with(searching_mock());
        let response = server
            .handle_message(request(
                Some(json!(5)),
                TOOLS_CALL,
                Some(json!({"name": "search", "arguments": {"query": "async rust"}})),
            ))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["results"][0]["title"], "Tokio");
        let text = result["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), result["structuredContent"]);
        assert!(server.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_tools_call_adapter_failure_is_error_result() {
        let server = McpServer::new(Arc::new(
            default_registry(Arc::new(FailingFactory)).unwrap(),
        ));
        let response = server
            .handle_message(request(
                Some(json!(6)),
                TOOLS_CALL,
                Some(json!({"name": "answer", "arguments": {"query": "q"}})),
            ))
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result.get("structuredContent").is_none());
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("create client: ")
        );
    }

    #[tokio::test]
    async fn test_tools_call_invalid_params() {
        let server = server_with(MockExa::new());

        let unknown = server
            .handle_message(request(
                Some(json!(7)),
                TOOLS_CALL,
                Some(json!({"name": "crawl", "arguments": {}})),
            ))
            .await
            .unwrap();
        let error = unknown.error.unwrap();
        assert_eq!(error.code, codes::INVALID_PARAMS);
        assert_eq!(error.message, "unknown tool: crawl");

        let bad_args = server
            .handle_message(request(
                Some(json!(8)),
                TOOLS_CALL,
                Some(json!({"name": "search", "arguments": {"numResults": 3}})),
            ))
            .await
            .unwrap();
        assert_eq!(bad_args.error.unwrap().code, codes::INVALID_PARAMS);

        let no_params = server
            .handle_message(request(Some(json!(9)), TOOLS_CALL, None))
            .await
            .unwrap();
        assert_eq!(no_params.error.unwrap().code, codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let server = server_with(MockExa::new());
        let mut req = request(Some(json!(1)), "ping", None);
        req.jsonrpc = "1.0".to_string();

        let response = server.handle_message(req).await.unwrap();
        assert_eq!(response.error.unwrap().code, codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_cancelled_call_produces_no_response() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Stall)).unwrap();
        let server = Arc::new(McpServer::new(Arc::new(registry)));

        let call = tokio::spawn({
            let server = Arc::clone(&server);
            async move {
                server
                    .handle_message(request(
                        Some(json!(42)),
                        TOOLS_CALL,
                        Some(json!({"name": "stall"})),
                    ))
                    .await
            }
        });

        while server.in_flight.lock().await.is_empty() {
            tokio::task::yield_now().await;
        }

        let ack = server
            .handle_message(request(
                None,
                "notifications/cancelled",
                Some(json!({"requestId": 42, "reason": "user aborted"})),
            ))
            .await;
        assert!(ack.is_none());

        assert!(call.await.unwrap().is_none());
        assert!(server.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_serve_over_stream() {
        let server = Arc::new(server_with(searching_mock()));
        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string(),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            "{not json".to_string(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}).to_string(),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "search", "arguments": {"query": "tokio"}}
            })
            .to_string(),
            json!({"jsonrpc": "2.0", "id": 4}).to_string(),
        ]
        .join("\n");

        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        server.serve(input.as_bytes(), writer).await.unwrap();

        let mut written = String::new();
        output.read_to_string(&mut written).await.unwrap();

        let responses: Vec<Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 5);

        let by_id = |id: Value| {
            responses
                .iter()
                .find(|r| r["id"] == id)
                .cloned()
                .unwrap()
        };
        assert_eq!(by_id(Value::Null)["error"]["code"], codes::PARSE_ERROR);
        assert_eq!(by_id(json!(2))["result"], json!({}));
        assert_eq!(by_id(json!(3))["result"]["isError"], false);
        assert_eq!(by_id(json!(4))["error"]["code"], codes::INVALID_REQUEST);
        assert!(by_id(json!(1))["result"]["serverInfo"].is_object());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_parse_error() {
        let server = Arc::new(server_with(MockExa::new()));
        let mut input = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})
            .to_string()
            .into_bytes();
        input.push(b'\n');
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})
                .to_string()
                .as_bytes(),
        );
        input.extend_from_slice(b"\r\n");

        let responses = serve_bytes(server, &input).await;
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"], json!({}));
        assert_eq!(responses[1]["id"], Value::Null);
        assert_eq!(responses[1]["error"]["code"], codes::PARSE_ERROR);
        assert_eq!(responses[2]["id"], 2);
        assert_eq!(responses[2]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_panicking_tool_does_not_stop_server() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Crash)).unwrap();
        let server = Arc::new(McpServer::new(Arc::new(registry)));

        let input = [
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": "crash"}
            })
            .to_string(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}).to_string(),
        ]
        .join("\n");

        let responses = serve_bytes(Arc::clone(&server), input.as_bytes()).await;
        assert_eq!(responses.len(), 2);

        let by_id = |id: i64| responses.iter().find(|r| r["id"] == id).unwrap();
        assert_eq!(by_id(1)["error"]["code"], codes::INTERNAL_ERROR);
        assert_eq!(by_id(2)["result"], json!({}));
        assert!(server.in_flight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_in_flight_id_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Stall)).unwrap();
        let server = Arc::new(McpServer::new(Arc::new(registry)));

        let first = tokio::spawn({
            let server = Arc::clone(&server);
            async move {
                server
                    .handle_message(request(
                        Some(json!(42)),
                        TOOLS_CALL,
                        Some(json!({"name": "stall"})),
                    ))
                    .await
            }
        });

        while server.in_flight.lock().await.is_empty() {
            tokio::task::yield_now().await;
        }

        let duplicate = server
            .handle_message(request(
                Some(json!(42)),
                TOOLS_CALL,
                Some(json!({"name": "stall"})),
            ))
            .await
            .unwrap();
        let error = duplicate.error.unwrap();
        assert_eq!(error.code, codes::INVALID_REQUEST);
        assert_eq!(error.message, "request id already in flight");
        assert!(server.in_flight.lock().await.contains_key("42"));

        server
            .handle_message(request(
                None,
                "notifications/cancelled",
                Some(json!({"requestId": 42})),
            ))
            .await;
        assert!(first.await.unwrap().is_none());
        assert!(server.in_flight.lock().await.is_empty());
    }
}
