#![forbid(unsafe_code)]

use std::fmt::Write as _;

use crate::map_url::{JobMap, MAP_HEIGHT, MAP_WIDTH};

pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// One legend row, resolved to display strings. `number` is the marker label
/// on the image, not the raw input index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegendEntry {
    pub number: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
}

pub fn legend_entries(map: &JobMap<'_>) -> Vec<LegendEntry> {
    map.placements
        .iter()
        .map(|p| LegendEntry {
            number: p.label.clone(),
            title: field_or_placeholder(p.job.title.as_deref()),
            company: field_or_placeholder(p.job.company.as_deref()),
            location: field_or_placeholder(p.job.location.as_deref()),
            url: p.job.url.clone().unwrap_or_default(),
        })
        .collect()
}

// Absent fields fall back to the placeholder; present-but-empty strings are
// rendered as-is.
fn field_or_placeholder(value: Option<&str>) -> String {
    match value {
        None => MISSING_FIELD_PLACEHOLDER.to_string(),
        Some(text) => text.to_string(),
    }
}

pub fn render_markdown(map: &JobMap<'_>) -> String {
    let legend = legend_entries(map)
        .into_iter()
        .map(|entry| {
            let title_part = if entry.url.is_empty() {
                entry.title
            } else {
                format!("[{}]({})", entry.title, entry.url)
            };
            format!(
                "**#{}** {} — {} — {}",
                entry.number, title_part, entry.company, entry.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "### 🗺️ Job Locations — {} offer(s) found\n\n![Job Map]({})\n\n{}",
        map.placements.len(),
        map.map_url,
        legend
    )
}

pub fn render_html(map: &JobMap<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<h3>🗺️ Job Locations — {} offer(s) found</h3>",
        map.placements.len()
    );
    let _ = writeln!(
        out,
        "<img src=\"{}\" alt=\"Job Map\" width=\"{MAP_WIDTH}\" height=\"{MAP_HEIGHT}\">",
        escape_html(&map.map_url)
    );
    let _ = writeln!(out, "<table>");
    let _ = writeln!(
        out,
        "<tr><th>#</th><th>Job Title</th><th>Company</th><th>Location</th></tr>"
    );
    for entry in legend_entries(map) {
        let title_cell = if entry.url.is_empty() {
            escape_html(&entry.title)
        } else {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&entry.url),
                escape_html(&entry.title)
            )
        };
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&entry.number),
            title_cell,
            escape_html(&entry.company),
            escape_html(&entry.location)
        );
    }
    let _ = write!(out, "</table>");
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobRecord;
    use crate::map_url::build_job_map;
    use crate::placement::PlacementPolicy;

    fn sample_jobs() -> Vec<JobRecord> {
        vec![
            JobRecord {
                title: Some("Python Developer".to_string()),
                company: Some("Acme".to_string()),
                location: Some("Milano, Italy".to_string()),
                url: Some("https://jobs.example/1".to_string()),
                ..JobRecord::default()
            },
            JobRecord {
                title: Some("Rust Engineer".to_string()),
                company: Some("Beta".to_string()),
                location: Some("Roma, Italy".to_string()),
                ..JobRecord::default()
            },
        ]
    }

    fn sample_map(jobs: &[JobRecord]) -> JobMap<'_> {
        build_job_map(jobs, PlacementPolicy::LocationOnly, Some("test-key")).unwrap()
    }

    #[test]
    fn markdown_block_matches_contract_bytes() {
        let jobs = sample_jobs();
        let rendered = render_markdown(&sample_map(&jobs));
        let expected = "### 🗺️ Job Locations — 2 offer(s) found\n\n\
                        ![Job Map](https://maps.googleapis.com/maps/api/staticmap?size=700x420&maptype=roadmap\
                        &markers=color:red%7Clabel:1%7CMilano%2C+Italy\
                        &markers=color:red%7Clabel:2%7CRoma%2C+Italy\
                        &key=test-key)\n\n\
                        **#1** [Python Developer](https://jobs.example/1) — Acme — Milano, Italy\n\
                        **#2** Rust Engineer — Beta — Roma, Italy";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn missing_fields_render_placeholders_and_unlinked_titles() {
        let jobs = vec![JobRecord {
            location: Some("Berlin".to_string()),
            ..JobRecord::default()
        }];
        let rendered = render_markdown(&sample_map(&jobs));
        assert!(rendered.contains("**#1** N/A — N/A — Berlin"));
        assert!(!rendered.contains("[N/A]"));
    }

    #[test]
    fn empty_url_means_unlinked_title() {
        let jobs = vec![JobRecord {
            title: Some("Dev".to_string()),
            location: Some("Berlin".to_string()),
            url: Some(String::new()),
            ..JobRecord::default()
        }];
        let rendered = render_markdown(&sample_map(&jobs));
        assert!(rendered.contains("**#1** Dev — N/A — Berlin"));
        assert!(!rendered.contains("[Dev]"));
    }

    #[test]
    fn html_escapes_job_fields() {
        let jobs = vec![JobRecord {
            title: Some("Dev & <Senior>".to_string()),
            company: Some("A\"B".to_string()),
            location: Some("Berlin".to_string()),
            ..JobRecord::default()
        }];
        let rendered = render_html(&sample_map(&jobs));
        assert!(rendered.contains("Dev &amp; &lt;Senior&gt;"));
        assert!(rendered.contains("A&quot;B"));
        assert!(!rendered.contains("<Senior>"));
    }

    #[test]
    fn html_has_heading_image_and_one_row_per_marker() {
        let jobs = sample_jobs();
        let rendered = render_html(&sample_map(&jobs));
        assert!(rendered.starts_with("<h3>🗺️ Job Locations — 2 offer(s) found</h3>\n"));
        assert!(rendered.contains("alt=\"Job Map\" width=\"700\" height=\"420\""));
        assert!(rendered.contains(
            "src=\"https://maps.googleapis.com/maps/api/staticmap?size=700x420&amp;maptype=roadmap"
        ));
        assert_eq!(rendered.matches("<tr><td>").count(), 2);
        assert!(rendered.contains("<a href=\"https://jobs.example/1\">Python Developer</a>"));
        assert!(rendered.ends_with("</table>"));
    }

    #[test]
    fn legend_rows_follow_marker_order_and_labels() {
        let jobs = sample_jobs();
        let entries = legend_entries(&sample_map(&jobs));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].number, "1");
        assert_eq!(entries[0].title, "Python Developer");
        assert_eq!(entries[1].number, "2");
        assert_eq!(entries[1].company, "Beta");
        assert_eq!(entries[1].url, "");
    }
}
