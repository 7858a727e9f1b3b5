use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::data::aggregate::aggregate;
use crate::data::error::LoadError;
use crate::data::filter::filter;
use crate::data::loader::load_file;
use crate::data::model::{Dataset, PayloadRange, SiteSelection, ALL_SITES};
use crate::data::series::{ChartSeries, PieSlice, ScatterPoint};

// ---------------------------------------------------------------------------
// Dashboard – what the UI/event layer talks to
// ---------------------------------------------------------------------------

/// One entry of the launch-site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// Host-facing query surface over a shared, read-only dataset.
///
/// Takes selections as the raw strings a dropdown produces and ranges as
/// the `[min, max]` pair a range slider produces. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Load the dataset from disk. An unreadable or malformed file is fatal.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(Arc::new(load_file(path)?)))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Pie-chart series for a dropdown value (`"ALL"` or a site name).
    pub fn aggregate(&self, selection: &str) -> ChartSeries<PieSlice> {
        aggregate(&self.dataset, &SiteSelection::from(selection))
    }

    /// Scatter-chart series for a dropdown value and slider position.
    pub fn filter(&self, selection: &str, range: [f64; 2]) -> ChartSeries<ScatterPoint> {
        filter(
            &self.dataset,
            &SiteSelection::from(selection),
            &PayloadRange::from(range),
        )
    }

    /// Dropdown entries: "All Sites" first, then each site as first seen.
    pub fn site_options(&self) -> Vec<SiteOption> {
        let all = SiteOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        };
        std::iter::once(all)
            .chain(self.dataset.launch_sites().into_iter().map(|site| SiteOption {
                label: site.to_string(),
                value: site.to_string(),
            }))
            .collect()
    }

    /// Slider limits.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.dataset.payload_bounds()
    }

    /// Initial slider position: the whole observed range (`[0, 0]` when the
    /// dataset is empty).
    pub fn default_range(&self) -> [f64; 2] {
        let bounds = self.payload_bounds();
        [bounds.min_kg, bounds.max_kg]
    }
}
