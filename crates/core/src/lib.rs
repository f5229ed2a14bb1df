#![forbid(unsafe_code)]

pub mod map_url;
pub mod markers;
pub mod placement;
pub mod render;

pub mod job {
    /// One job offer as supplied by the upstream search step. Every field is
    /// optional: missing display fields fall back to a placeholder at render
    /// time, and a job with neither coordinates nor a usable location is
    /// left off the map.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct JobRecord {
        pub title: Option<String>,
        pub company: Option<String>,
        pub location: Option<String>,
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,
        pub url: Option<String>,
    }

    impl JobRecord {
        pub fn coordinates(&self) -> Option<(f64, f64)> {
            match (self.latitude, self.longitude) {
                (Some(lat), Some(lng)) => Some((lat, lng)),
                _ => None,
            }
        }

        /// Location text with surrounding whitespace removed; `None` when the
        /// field is absent or blank.
        pub fn trimmed_location(&self) -> Option<&str> {
            let location = self.location.as_deref()?.trim();
            if location.is_empty() {
                None
            } else {
                Some(location)
            }
        }
    }
}
