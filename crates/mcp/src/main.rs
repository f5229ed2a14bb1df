#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

pub(crate) use jm_core::placement::PlacementPolicy;
use std::fmt::Write as _;

// Protocol negotiation:
// Some MCP clients are strict about the server echoing a compatible protocol version.
// We keep this at the widely deployed baseline and remain forward-compatible in behavior.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "job-map-renderer";
const SERVER_VERSION: &str = "0.1.0";

fn write_last_crash(log_dir: &std::path::Path, kind: &str, detail: &str) {
    // Best-effort crash report to help debug MCP transport issues without logging request bodies.
    let _ = std::fs::create_dir_all(log_dir);
    let path = log_dir.join("jobmap_mcp_last_crash.txt");

    let mut out = String::new();
    let ts_ms = crate::support::now_ms_i64();
    let _ = writeln!(out, "ts={}", crate::support::ts_ms_to_rfc3339(ts_ms));
    let _ = writeln!(out, "pid={}", std::process::id());
    let _ = writeln!(out, "kind={kind}");
    let _ = writeln!(out, "build={}", crate::build_fingerprint());
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let _ = writeln!(out, "cwd={}", cwd.to_string_lossy());
    let _ = writeln!(
        out,
        "args={:?}",
        crate::redact_args(std::env::args().collect())
    );
    let _ = writeln!(out, "detail={detail}");

    let _ = std::fs::write(path, out);
}

fn install_crash_reporter(log_dir: std::path::PathBuf) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut detail = info.to_string();
        let backtrace = std::backtrace::Backtrace::force_capture();
        let _ = write!(&mut detail, "\nbacktrace:\n{backtrace}");
        write_last_crash(&log_dir, "panic", &detail);
        default_hook(info);
    }));
}

pub(crate) struct McpServer {
    initialized: bool,
    maps_api_key: Option<String>,
    output_format: OutputFormat,
    placement_policy: PlacementPolicy,
    session: SessionLog,
}

pub(crate) struct McpServerConfig {
    maps_api_key: Option<String>,
    output_format: OutputFormat,
    placement_policy: PlacementPolicy,
}

fn usage() -> &'static str {
    "jm_mcp — job map renderer MCP server (Rust, deterministic, stdio-first)\n\n\
USAGE:\n\
  jm_mcp [--maps-api-key KEY] [--format markdown|html|json]\n\
         [--placement location|coordinates] [--log-dir DIR]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version/build and exit\n\
\n\
NOTES:\n\
  - Env fallbacks: GOOGLE_MAPS_API_KEY, JOBMAP_FORMAT, JOBMAP_PLACEMENT, JOBMAP_LOG_DIR\n\
  - Session and crash records land in --log-dir (default: <tmp>/jobmap_mcp)\n"
}

fn version_line() -> String {
    format!(
        "jm_mcp {SERVER_VERSION} build={}",
        crate::build_fingerprint()
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    let log_dir = parse_log_dir();
    install_crash_reporter(log_dir.clone());
    // Always emit a small, bounded session record for debugging MCP transport issues.
    // This is written to the log directory and never to stdout/stderr.
    let session = crate::SessionLog::new(&log_dir);
    let log_dir_for_errors = log_dir;

    let mut server = McpServer::new(
        McpServerConfig {
            maps_api_key: parse_maps_api_key(),
            output_format: parse_output_format(),
            placement_policy: parse_placement_policy(),
        },
        session,
    );
    let result = entry::run_stdio(&mut server);
    if let Err(err) = &result {
        write_last_crash(&log_dir_for_errors, "error", &format!("{err:?}"));
    }
    result
}
