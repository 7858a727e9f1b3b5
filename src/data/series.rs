use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::model::Outcome;

// ---------------------------------------------------------------------------
// ChartSeries – rows handed to the charting layer
// ---------------------------------------------------------------------------

/// Ordered rows for one chart. Every query builds a fresh series, so callers
/// own it outright.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartSeries<R> {
    rows: Vec<R>,
}

impl<R> ChartSeries<R> {
    pub fn new(rows: Vec<R>) -> Self {
        ChartSeries { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R> Default for ChartSeries<R> {
    fn default() -> Self {
        ChartSeries { rows: Vec::new() }
    }
}

impl<R> FromIterator<R> for ChartSeries<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        ChartSeries {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a ChartSeries<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// Pie rows
// ---------------------------------------------------------------------------

/// Slice name: a site when comparing sites, an outcome inside one site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PieCategory {
    Site(String),
    Outcome(Outcome),
}

impl fmt::Display for PieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieCategory::Site(s) => write!(f, "{s}"),
            PieCategory::Outcome(o) => write!(f, "{o}"),
        }
    }
}

/// One pie slice. `value` is a success rate in `[0, 1]` for the all-sites
/// view and a launch count for a single site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub category: PieCategory,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Scatter rows
// ---------------------------------------------------------------------------

/// One scatter point: payload against outcome, coloured by booster category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: Outcome,
    pub color_category: String,
}

// ---------------------------------------------------------------------------
// Arrow conversion (tabular display)
// ---------------------------------------------------------------------------

/// Conversion of a series into a single Arrow record batch.
pub trait ToRecordBatch {
    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError>;
}

impl ToRecordBatch for ChartSeries<PieSlice> {
    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let schema = Schema::new(vec![
            Field::new("category", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
        ]);
        let categories: Vec<String> = self.iter().map(|s| s.category.to_string()).collect();
        let values: Vec<f64> = self.iter().map(|s| s.value).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(categories)),
            Arc::new(Float64Array::from(values)),
        ];
        RecordBatch::try_new(Arc::new(schema), columns)
    }
}

impl ToRecordBatch for ChartSeries<ScatterPoint> {
    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Float64, false),
            Field::new("y", DataType::UInt8, false),
            Field::new("color_category", DataType::Utf8, false),
        ]);
        let xs: Vec<f64> = self.iter().map(|p| p.x).collect();
        let ys: Vec<u8> = self.iter().map(|p| p.y.as_class()).collect();
        let colors: Vec<&str> = self.iter().map(|p| p.color_category.as_str()).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from(xs)),
            Arc::new(UInt8Array::from(ys)),
            Arc::new(StringArray::from(colors)),
        ];
        RecordBatch::try_new(Arc::new(schema), columns)
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::AsArray;
    use arrow::datatypes::Float64Type;

    use super::*;

    #[test]
    fn pie_rows_serialize_with_site_or_outcome_category() {
        let series = ChartSeries::new(vec![
            PieSlice {
                category: PieCategory::Site("KSC".into()),
                value: 1.0,
            },
            PieSlice {
                category: PieCategory::Outcome(Outcome::Failure),
                value: 3.0,
            },
        ]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"category": "KSC", "value": 1.0},
                {"category": 0, "value": 3.0}
            ])
        );
    }

    #[test]
    fn scatter_batch_has_one_row_per_point() {
        let series: ChartSeries<ScatterPoint> = vec![
            ScatterPoint {
                x: 500.0,
                y: Outcome::Success,
                color_category: "v1.0".into(),
            },
            ScatterPoint {
                x: 1500.0,
                y: Outcome::Failure,
                color_category: "FT".into(),
            },
        ]
        .into_iter()
        .collect();

        let batch = series.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);
        let xs = batch.column(0).as_primitive::<Float64Type>();
        assert_eq!(xs.value(1), 1500.0);
        assert_eq!(batch.column(2).as_string::<i32>().value(0), "v1.0");
    }

    #[test]
    fn empty_series_still_builds_a_batch() {
        let batch = ChartSeries::<PieSlice>::default().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(0).name(), "category");
    }
}
