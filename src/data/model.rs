use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::error::LoadError;
use super::group::group_first_seen;

/// Host-side literal that selects every launch site.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Stored in the source data as `class` (1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a raw class value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Like [`Outcome::from_class`] but for float-typed columns (`1.0`).
    pub fn from_class_f64(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_class())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        LaunchRecord {
            launch_site: launch_site.into(),
            payload_mass_kg,
            booster_version_category: booster_version_category.into(),
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// SiteSelection / PayloadRange – query parameters
// ---------------------------------------------------------------------------

/// Which launch sites a query looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record launched from `site` is part of this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl From<&str> for SiteSelection {
    /// Maps the `"ALL"` literal to [`SiteSelection::All`]. Any other string is
    /// taken as a site name, known or not.
    fn from(s: &str) -> Self {
        if s == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(s.to_string())
        }
    }
}

impl FromStr for SiteSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SiteSelection::from(s))
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[min_kg, max_kg]`.
///
/// A reversed interval is allowed and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl PayloadRange {
    pub fn new(min_kg: f64, max_kg: f64) -> Self {
        PayloadRange { min_kg, max_kg }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min_kg <= payload_mass_kg && payload_mass_kg <= self.max_kg
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([min_kg, max_kg]: [f64; 2]) -> Self {
        PayloadRange::new(min_kg, max_kg)
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.min_kg, self.max_kg)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All launch records plus the payload bounds computed at load time.
///
/// A dataset may hold zero records; its payload bounds are then `[0, 0]`
/// and every query returns an empty series.
///
/// There is no way to mutate a `Dataset` once built; share it behind an
/// `Arc` when several query callers need it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
}

impl Dataset {
    /// Validate the records and compute the payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        for (row, rec) in records.iter().enumerate() {
            if rec.launch_site.is_empty() {
                return Err(LoadError::InvalidValue {
                    row,
                    column: super::LAUNCH_SITE,
                    value: String::new(),
                });
            }
            let mass = rec.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(LoadError::InvalidValue {
                    row,
                    column: super::PAYLOAD_MASS,
                    value: mass.to_string(),
                });
            }
            min_payload = min_payload.min(mass);
            max_payload = max_payload.max(mass);
        }
        if records.is_empty() {
            min_payload = 0.0;
            max_payload = 0.0;
        }

        Ok(Dataset {
            records,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Observed payload bounds, used to seed the range slider.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }

    /// Distinct launch sites in the order they first appear.
    pub fn launch_sites(&self) -> Vec<&str> {
        let sites = self.records.iter().map(|rec| rec.launch_site.as_str());
        group_first_seen(sites, |site| *site)
            .into_iter()
            .map(|(site, _)| site)
            .collect()
    }

    /// Records belonging to `selection`, in dataset order.
    pub fn select<'a>(
        &'a self,
        selection: &'a SiteSelection,
    ) -> impl Iterator<Item = (usize, &'a LaunchRecord)> + 'a {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, rec)| selection.matches(&rec.launch_site))
    }
}
