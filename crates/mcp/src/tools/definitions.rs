#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn job_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "company": { "type": "string" },
            "location": { "type": "string", "description": "City/region, e.g. \"Milano, Italy\"." },
            "latitude": { "type": "number" },
            "longitude": { "type": "number" },
            "url": { "type": "string" }
        }
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![json!({
        "name": "render_jobs_map",
        "description": "Render job offer locations on a static map image with numbered markers. \
                        Call this after a job search returns results and pass the job list directly \
                        from the search response. Returns the rendered output (markdown by default); \
                        show it to the user exactly as-is without reformatting or summarizing it.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "jobs": { "type": "array", "items": job_schema() },
                "format": { "type": "string", "enum": ["markdown", "html", "json"] },
                "placement": { "type": "string", "enum": ["location", "coordinates"] }
            },
            "required": ["jobs"]
        },
    })]
}
