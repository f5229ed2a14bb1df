#![forbid(unsafe_code)]

mod definitions;
mod dispatch;
mod render_map;

pub(crate) use definitions::tool_definitions;
pub(crate) use dispatch::dispatch_tool;
