#![forbid(unsafe_code)]

use crate::job::JobRecord;
use crate::placement::{Placement, PlacementPolicy, PlacementTally, place_jobs};

pub const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";
pub const MAP_WIDTH: u32 = 700;
pub const MAP_HEIGHT: u32 = 420;
pub const MAP_TYPE: &str = "roadmap";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobMapError {
    MissingApiKey,
    NoJobs,
    NoPlacements,
}

impl JobMapError {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingApiKey => "Error: GOOGLE_MAPS_API_KEY not configured on the server.",
            Self::NoJobs => "No jobs provided to render on the map.",
            Self::NoPlacements => "No valid locations found in the job list.",
        }
    }
}

/// Everything one rendering call computes. Marker k on the image and legend
/// row k always describe the same job.
#[derive(Clone, Debug, PartialEq)]
pub struct JobMap<'a> {
    pub map_url: String,
    pub placements: Vec<Placement<'a>>,
    pub tally: PlacementTally,
}

pub fn build_job_map<'a>(
    jobs: &'a [JobRecord],
    policy: PlacementPolicy,
    api_key: Option<&str>,
) -> Result<JobMap<'a>, JobMapError> {
    let api_key = api_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(JobMapError::MissingApiKey)?;
    if jobs.is_empty() {
        return Err(JobMapError::NoJobs);
    }

    let (placements, tally) = place_jobs(jobs, policy);
    if placements.is_empty() {
        return Err(JobMapError::NoPlacements);
    }

    let map_url = build_map_url(&placements, api_key);
    Ok(JobMap {
        map_url,
        placements,
        tally,
    })
}

// Marker parameters appear in placement order, so the label sequence on the
// image matches the legend. %7C is the pipe separator Google expects.
fn build_map_url(placements: &[Placement<'_>], api_key: &str) -> String {
    let markers = placements
        .iter()
        .map(|p| format!("markers=color:red%7Clabel:{}%7C{}", p.label, p.rendered_location))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{STATIC_MAP_ENDPOINT}?size={MAP_WIDTH}x{MAP_HEIGHT}&maptype={MAP_TYPE}&{markers}&key={api_key}"
    )
}
