#![forbid(unsafe_code)]

use std::path::PathBuf;

use crate::PlacementPolicy;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OutputFormat {
    Markdown,
    Html,
    Json,
}

impl OutputFormat {
    pub(crate) fn from_str(value: &str) -> Option<Self> {
        match value {
            "markdown" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub(crate) fn parse(value: Option<&str>) -> Self {
        value.and_then(Self::from_str).unwrap_or(Self::Markdown)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

fn flag_value(flag: &str) -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg.as_str() == flag
            && let Some(value) = args.next()
        {
            return Some(value);
        }
    }
    None
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn parse_maps_api_key() -> Option<String> {
    // A present-but-blank key is treated the same as no key at all, so the
    // server reports the configuration error instead of signing URLs with "".
    flag_value("--maps-api-key")
        .or_else(|| env_value("GOOGLE_MAPS_API_KEY"))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

// Startup parsing is forgiving: an invalid value falls back to the default
// rather than refusing to start. Per-call overrides are validated strictly.
pub(crate) fn parse_output_format() -> OutputFormat {
    let value = flag_value("--format").or_else(|| env_value("JOBMAP_FORMAT"));
    OutputFormat::parse(value.as_deref())
}

pub(crate) fn parse_placement_policy() -> PlacementPolicy {
    let value = flag_value("--placement").or_else(|| env_value("JOBMAP_PLACEMENT"));
    PlacementPolicy::parse(value.as_deref())
}

pub(crate) fn parse_log_dir() -> PathBuf {
    flag_value("--log-dir")
        .or_else(|| env_value("JOBMAP_LOG_DIR"))
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("jobmap_mcp"))
}
