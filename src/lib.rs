//! Query layer for a rocket launch records dashboard.
//!
//! Loads a launch table once, then answers the two chart queries the
//! dashboard needs: success shares per site (pie) and payload vs. outcome
//! (scatter). Rendering and event wiring live with the caller.

pub mod dashboard;
pub mod data;

pub use dashboard::{Dashboard, SiteOption};
pub use data::error::LoadError;
pub use data::model::{Dataset, LaunchRecord, Outcome, PayloadRange, SiteSelection};
pub use data::series::{ChartSeries, PieCategory, PieSlice, ScatterPoint, ToRecordBatch};
