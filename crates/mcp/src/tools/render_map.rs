#![forbid(unsafe_code)]

use jm_core::map_url::{JobMap, JobMapError, build_job_map};
use jm_core::placement::PlacementPolicy;
use jm_core::render::{escape_html, legend_entries, render_html, render_markdown};
use serde_json::{Value, json};

use crate::{McpServer, OutputFormat, ToolOutcome, jobs_from_args, optional_string};

impl McpServer {
    pub(crate) fn tool_render_jobs_map(&mut self, args: Value) -> ToolOutcome {
        let Some(args) = args.as_object() else {
            return ToolOutcome::error("arguments must be an object");
        };

        // Per-call overrides are validated strictly; only the startup config
        // falls back to defaults on invalid values.
        let format = match optional_string(args, "format") {
            Ok(None) => self.output_format,
            Ok(Some(value)) => match OutputFormat::from_str(&value) {
                Some(format) => format,
                None => return ToolOutcome::error("format must be one of: markdown|html|json"),
            },
            Err(outcome) => return outcome,
        };
        let policy = match optional_string(args, "placement") {
            Ok(None) => self.placement_policy,
            Ok(Some(value)) => match PlacementPolicy::from_str(&value) {
                Some(policy) => policy,
                None => {
                    return ToolOutcome::error("placement must be one of: location|coordinates");
                }
            },
            Err(outcome) => return outcome,
        };

        let jobs = jobs_from_args(args);
        match build_job_map(&jobs, policy, self.maps_api_key.as_deref()) {
            Ok(map) => {
                self.session.note_render(&format!(
                    "tool=render_jobs_map format={} placement={} placed={}",
                    format.as_str(),
                    policy.as_str(),
                    map.tally.placed
                ));
                ToolOutcome::ok(render_success(&map, format, policy))
            }
            Err(err) => {
                self.session.note_render(&format!(
                    "tool=render_jobs_map format={} placement={} error={err:?}",
                    format.as_str(),
                    policy.as_str()
                ));
                render_failure(err, format)
            }
        }
    }
}

fn render_success(map: &JobMap<'_>, format: OutputFormat, policy: PlacementPolicy) -> String {
    match format {
        OutputFormat::Markdown => render_markdown(map),
        OutputFormat::Html => render_html(map),
        OutputFormat::Json => pretty_json(&structured_result(map, policy)),
    }
}

fn render_failure(err: JobMapError, format: OutputFormat) -> ToolOutcome {
    let message = err.message();
    let text = match format {
        OutputFormat::Markdown => message.to_string(),
        OutputFormat::Html => format!("<p>{}</p>", escape_html(message)),
        OutputFormat::Json => pretty_json(&json!({ "status": "error", "error": message })),
    };
    ToolOutcome::error(text)
}

// Consumers of the structured mode render the image and legend themselves.
const STRUCTURED_INSTRUCTIONS: &str =
    "Render the image from map_url, then list the jobs in order as the marker legend.";

fn structured_result(map: &JobMap<'_>, policy: PlacementPolicy) -> Value {
    let jobs = legend_entries(map)
        .into_iter()
        .map(|entry| {
            json!({
                "number": entry.number,
                "title": entry.title,
                "company": entry.company,
                "location": entry.location,
                "url": entry.url
            })
        })
        .collect::<Vec<_>>();

    let mut result = json!({
        "map_url": map.map_url,
        "total": map.tally.placed,
        "jobs": jobs,
        "instructions": STRUCTURED_INSTRUCTIONS
    });
    // Placement counters only exist under the coordinate-preferring policy;
    // the location-only policy reports totals alone.
    if policy == PlacementPolicy::PreferCoordinates
        && let Some(obj) = result.as_object_mut()
    {
        obj.insert(
            "by_coordinates".to_string(),
            json!(map.tally.by_coordinates),
        );
        obj.insert("by_location".to_string(), json!(map.tally.by_location));
        obj.insert("skipped".to_string(), json!(map.tally.skipped));
    }
    result
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
