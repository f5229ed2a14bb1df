#![forbid(unsafe_code)]

use crate::{McpServer, ToolOutcome};
use serde_json::Value;

pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<ToolOutcome> {
    match name {
        "render_jobs_map" => Some(server.tool_render_jobs_map(args)),
        _ => None,
    }
}
