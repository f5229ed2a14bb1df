#![forbid(unsafe_code)]

use crate::job::JobRecord;
use crate::markers::{encode_location, marker_label};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlacementPolicy {
    LocationOnly,
    PreferCoordinates,
}

impl PlacementPolicy {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "location" => Some(Self::LocationOnly),
            "coordinates" => Some(Self::PreferCoordinates),
            _ => None,
        }
    }

    pub fn parse(value: Option<&str>) -> Self {
        value.and_then(Self::from_str).unwrap_or(Self::LocationOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocationOnly => "location",
            Self::PreferCoordinates => "coordinates",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlacementMode {
    Coordinates,
    Text,
}

/// One retained marker. Jobs that cannot be placed never produce a
/// placement; the tally records how many were skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<'a> {
    pub ordinal: usize,
    pub label: String,
    pub mode: PlacementMode,
    pub rendered_location: String,
    pub job: &'a JobRecord,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlacementTally {
    pub placed: usize,
    pub by_coordinates: usize,
    pub by_location: usize,
    pub skipped: usize,
}

pub fn place_jobs(
    jobs: &[JobRecord],
    policy: PlacementPolicy,
) -> (Vec<Placement<'_>>, PlacementTally) {
    match policy {
        PlacementPolicy::LocationOnly => place_by_location(jobs),
        PlacementPolicy::PreferCoordinates => place_preferring_coordinates(jobs),
    }
}

// Jobs without a usable location are dropped and the survivors are numbered
// 1..K, so labels stay contiguous no matter which inputs were skipped.
fn place_by_location(jobs: &[JobRecord]) -> (Vec<Placement<'_>>, PlacementTally) {
    let mut placements = Vec::new();
    let mut tally = PlacementTally::default();

    for job in jobs {
        let Some(location) = job.trimmed_location() else {
            tally.skipped += 1;
            continue;
        };
        let ordinal = placements.len() + 1;
        placements.push(Placement {
            ordinal,
            label: marker_label(ordinal),
            mode: PlacementMode::Text,
            rendered_location: encode_location(location),
            job,
        });
        tally.placed += 1;
        tally.by_location += 1;
    }

    (placements, tally)
}

// Ordinals follow the original input position, so skipped jobs leave gaps in
// the label sequence. Coordinates win over location text when both exist.
fn place_preferring_coordinates(jobs: &[JobRecord]) -> (Vec<Placement<'_>>, PlacementTally) {
    let mut placements = Vec::new();
    let mut tally = PlacementTally::default();

    for (index, job) in jobs.iter().enumerate() {
        let ordinal = index + 1;
        if let Some((lat, lng)) = job.coordinates() {
            placements.push(Placement {
                ordinal,
                label: marker_label(ordinal),
                mode: PlacementMode::Coordinates,
                rendered_location: format!("{lat},{lng}"),
                job,
            });
            tally.placed += 1;
            tally.by_coordinates += 1;
        } else if let Some(location) = job.trimmed_location() {
            placements.push(Placement {
                ordinal,
                label: marker_label(ordinal),
                mode: PlacementMode::Text,
                rendered_location: encode_location(location),
                job,
            });
            tally.placed += 1;
            tally.by_location += 1;
        } else {
            tally.skipped += 1;
        }
    }

    (placements, tally)
}
