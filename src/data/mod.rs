/// Data layer: core types, loading, and the two chart queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<LaunchRecord>, payload bounds (immutable)
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌───────────┐         ┌──────────┐
///   │ aggregate │ pie     │  filter  │ scatter
///   └───────────┘         └──────────┘
///        │                      │
///        ▼                      ▼
///   ChartSeries<PieSlice>  ChartSeries<ScatterPoint>
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod group;
pub mod loader;
pub mod model;
pub mod series;

// Required source columns.
pub const LAUNCH_SITE: &str = "Launch Site";
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const CLASS: &str = "class";

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{Dataset, LaunchRecord, Outcome};

    /// Three-record dataset: two CCAFS launches (one success) and one KSC success.
    pub fn example_dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, "v1", Outcome::Success),
            LaunchRecord::new("CCAFS", 1500.0, "v1", Outcome::Failure),
            LaunchRecord::new("KSC", 2500.0, "v2", Outcome::Success),
        ])
        .unwrap()
    }

    /// A slice of real-looking launch history across the four Falcon 9 pads.
    pub fn falcon_dataset() -> Dataset {
        use Outcome::{Failure, Success};
        let rows = [
            ("CCAFS LC-40", 0.0, "v1.0", Failure),
            ("CCAFS LC-40", 525.0, "v1.0", Failure),
            ("CCAFS LC-40", 677.0, "v1.0", Failure),
            ("CCAFS LC-40", 3170.0, "v1.1", Success),
            ("VAFB SLC-4E", 500.0, "v1.1", Failure),
            ("CCAFS LC-40", 4428.0, "v1.1", Failure),
            ("VAFB SLC-4E", 9600.0, "FT", Success),
            ("KSC LC-39A", 2490.0, "FT", Success),
            ("KSC LC-39A", 5600.0, "FT", Success),
            ("KSC LC-39A", 3669.0, "FT", Failure),
            ("CCAFS SLC-40", 2257.0, "B4", Success),
            ("CCAFS SLC-40", 6000.0, "B5", Success),
            ("KSC LC-39A", 5300.0, "B4", Success),
            ("CCAFS SLC-40", 15600.0, "B5", Success),
            ("VAFB SLC-4E", 9600.0, "B5", Success),
            ("CCAFS SLC-40", 2972.0, "B4", Failure),
        ];
        Dataset::from_records(
            rows.into_iter()
                .map(|(site, kg, booster, outcome)| LaunchRecord::new(site, kg, booster, outcome))
                .collect(),
        )
        .unwrap()
    }
}
