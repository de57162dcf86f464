//! MCP front end: answers `tools/list` from the registry and routes
//! `tools/call` through the [`Dispatcher`], served over stdio.

use std::sync::Arc;

use anyhow::Context;
use calmcp_core::{Dispatcher, ResponseEnvelope, ToolDescriptor, ToolSet};
use rmcp::{
    model::*,
    service::RequestContext,
    transport::stdio,
    RoleServer, ServerHandler, ServiceExt,
};
use tracing::{debug, info};

const INSTRUCTIONS: &str = "Create, list, update and delete events on the user's primary Google \
                            Calendar. Times are ISO-8601; values without an offset use the \
                            server's configured time zone.";

pub struct CalendarServer<T> {
    dispatcher: Arc<Dispatcher<T>>,
}

impl<T> Clone for CalendarServer<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<T: ToolSet + 'static> CalendarServer<T> {
    pub fn new(tools: T) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(tools)),
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.descriptors().iter().map(to_tool).collect()
    }

    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        to_call_result(self.dispatcher.dispatch(name, arguments).await)
    }

    /// Serve until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        info!("serving MCP over stdio");
        let service = self
            .serve(stdio())
            .await
            .context("failed to start MCP session on stdio")?;
        let reason = service.waiting().await.context("MCP session task failed")?;
        info!(?reason, "MCP session ended");
        Ok(())
    }
}

fn to_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        Arc::new(descriptor.input_schema()),
    )
}

fn to_call_result(envelope: ResponseEnvelope) -> CallToolResult {
    let content = vec![Content::text(envelope.text().to_string())];
    if envelope.is_error() {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl<T: ToolSet + 'static> ServerHandler for CalendarServer<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        debug!("tools/list");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        debug!(tool = %request.name, "tools/call");
        Ok(self.invoke(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use calmcp_core::{ArgumentBag, ProviderError, Result};
    use calmcp_tools::CALENDAR_TOOLS;
    use serde_json::{json, Value};

    use super::*;

    /// Calendar descriptors, with every call failing at the provider.
    struct Offline;

    #[async_trait]
    impl ToolSet for Offline {
        fn descriptors(&self) -> &'static [ToolDescriptor] {
            &CALENDAR_TOOLS
        }

        async fn invoke(&self, _name: &'static str, _args: ArgumentBag) -> Result<String> {
            Err(ProviderError::Api("network unreachable".into()).into())
        }
    }

    #[test]
    fn discovery_exposes_calendar_tools_with_schemas() {
        let tools = CalendarServer::new(Offline).tools();
        let listed: Vec<Value> = tools.iter().map(|t| serde_json::to_value(t).unwrap()).collect();

        let names: Vec<_> = listed.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["create_event", "list_events", "update_event", "delete_event"]);
        assert_eq!(listed[0]["inputSchema"]["required"], json!(["summary", "start_time", "end_time"]));
        assert_eq!(listed[1]["inputSchema"]["properties"]["max_results"]["type"], "integer");
        assert_eq!(listed[3]["inputSchema"]["required"], json!(["event_id"]));
    }

    #[tokio::test]
    async fn unknown_tool_is_a_tool_error_not_a_protocol_error() {
        let result = CalendarServer::new(Offline)
            .invoke("rename_calendar", json!({ "x": 1 }).as_object().cloned())
            .await;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "Unknown tool: rename_calendar");
    }

    #[tokio::test]
    async fn provider_failures_are_flagged() {
        let result = CalendarServer::new(Offline)
            .invoke("delete_event", json!({ "event_id": "e1" }).as_object().cloned())
            .await;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "calendar API error: network unreachable");
    }

    #[tokio::test]
    async fn missing_arguments_are_flagged() {
        let result = CalendarServer::new(Offline).invoke("list_events", None).await;
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "No arguments provided");
    }

    #[test]
    fn success_envelope_is_not_flagged() {
        let value = serde_json::to_value(to_call_result(ResponseEnvelope::success("ok"))).unwrap();
        assert_eq!(value["isError"], false);
        assert_eq!(value["content"][0]["type"], "text");
    }
}
