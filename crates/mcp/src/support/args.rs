#![forbid(unsafe_code)]

use jm_core::job::JobRecord;
use serde_json::{Map, Value};

use crate::ToolOutcome;

pub(crate) fn optional_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ToolOutcome> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(v) => Ok(Some(v.to_string())),
        _ => Err(ToolOutcome::error(format!("{key} must be a string"))),
    }
}

/// Defensive job parsing. The jobs array comes straight from an upstream
/// search tool, so shape defects degrade to absent fields instead of
/// failing the whole call.
pub(crate) fn jobs_from_args(args: &Map<String, Value>) -> Vec<JobRecord> {
    let Some(Value::Array(items)) = args.get("jobs") else {
        return Vec::new();
    };
    items.iter().map(job_from_value).collect()
}

fn job_from_value(value: &Value) -> JobRecord {
    let Some(obj) = value.as_object() else {
        return JobRecord::default();
    };
    JobRecord {
        title: string_field(obj, "title"),
        company: string_field(obj, "company"),
        location: string_field(obj, "location"),
        latitude: number_field(obj, "latitude"),
        longitude: number_field(obj, "longitude"),
        url: string_field(obj, "url"),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(v)) => Some(v.to_string()),
        _ => None,
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_jobs_degrade_to_empty() {
        let args = json!({ "jobs": "nope" });
        assert!(jobs_from_args(args.as_object().unwrap()).is_empty());
        let args = json!({});
        assert!(jobs_from_args(args.as_object().unwrap()).is_empty());
    }

    #[test]
    fn wrong_field_types_degrade_to_absent() {
        let args = json!({ "jobs": [{ "title": 7, "location": ["Milano"], "latitude": "41.9" }] });
        let jobs = jobs_from_args(args.as_object().unwrap());
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0], JobRecord::default());
    }

    #[test]
    fn non_object_entries_become_empty_records() {
        let args = json!({ "jobs": [null, 42, "Berlin"] });
        let jobs = jobs_from_args(args.as_object().unwrap());
        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|job| *job == JobRecord::default()));
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let args = json!({ "jobs": [{ "latitude": 42, "longitude": 12 }] });
        let jobs = jobs_from_args(args.as_object().unwrap());
        assert_eq!(jobs[0].coordinates(), Some((42.0, 12.0)));
    }

    #[test]
    fn optional_string_rejects_non_strings() {
        let args = json!({ "format": 3 });
        let err = optional_string(args.as_object().unwrap(), "format").unwrap_err();
        assert!(err.is_error);
        assert_eq!(err.text, "format must be a string");
    }

    #[test]
    fn optional_string_treats_null_as_absent() {
        let args = json!({ "format": null });
        assert_eq!(
            optional_string(args.as_object().unwrap(), "format").unwrap(),
            None
        );
    }
}
