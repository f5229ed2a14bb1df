#![forbid(unsafe_code)]

mod args;
mod build_info;
mod jsonrpc;
mod redact;
mod runtime;
mod session_log;
mod time;

pub(crate) use args::*;
pub(crate) use build_info::*;
pub(crate) use jsonrpc::*;
pub(crate) use redact::*;
pub(crate) use runtime::*;
pub(crate) use session_log::*;
pub(crate) use time::*;
