use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{Dataset, LaunchRecord, Outcome};
use super::{BOOSTER_CATEGORY, CLASS, LAUNCH_SITE, PAYLOAD_MASS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launch records from {} (payload {})",
        dataset.len(),
        path.display(),
        dataset.payload_bounds()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Positions of the required columns within a header or schema.
struct ColumnIndex {
    site: usize,
    payload: usize,
    booster: usize,
    class: usize,
}

impl ColumnIndex {
    fn locate(mut find: impl FnMut(&str) -> Option<usize>) -> Result<Self, LoadError> {
        let mut require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));
        Ok(ColumnIndex {
            site: require(LAUNCH_SITE)?,
            payload: require(PAYLOAD_MASS)?,
            booster: require(BOOSTER_CATEGORY)?,
            class: require(CLASS)?,
        })
    }
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

fn outcome_from(class: f64, row: usize) -> Result<Outcome, LoadError> {
    Outcome::from_class_f64(class).ok_or_else(|| invalid(row, CLASS, class))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Columns other than the four
/// required ones (flight number, booster version, an unnamed index) are
/// ignored.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    let cols = ColumnIndex::locate(|name| headers.iter().position(|h| h.trim() == name))?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Text cells are kept verbatim; only numbers tolerate padding.
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let payload_text = cell(cols.payload).trim();
        let payload_mass_kg = payload_text
            .parse::<f64>()
            .map_err(|_| invalid(row, PAYLOAD_MASS, payload_text))?;

        let class_text = cell(cols.class).trim();
        let class = class_text
            .parse::<f64>()
            .map_err(|_| invalid(row, CLASS, class_text))?;

        records.push(LaunchRecord::new(
            cell(cols.site),
            payload_mass_kg,
            cell(cols.booster),
            outcome_from(class, row)?,
        ));
    }

    Dataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::ColumnType {
            column: "<root>",
            found: "non-array JSON document".into(),
        })?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or_else(|| invalid(row, "<row>", value))?;

        let launch_site = json_str(obj, LAUNCH_SITE, row)?;
        let payload_mass_kg = json_f64(obj, PAYLOAD_MASS, row)?;
        let booster = json_str(obj, BOOSTER_CATEGORY, row)?;
        let class = json_f64(obj, CLASS, row)?;

        records.push(LaunchRecord::new(
            launch_site,
            payload_mass_kg,
            booster,
            outcome_from(class, row)?,
        ));
    }

    Dataset::from_records(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, LoadError> {
    obj.get(column).ok_or(LoadError::MissingColumn(column))
}

fn json_str<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
    row: usize,
) -> Result<&'a str, LoadError> {
    let value = json_field(obj, column)?;
    value.as_str().ok_or_else(|| invalid(row, column, value))
}

fn json_f64(obj: &Map<String, JsonValue>, column: &'static str, row: usize) -> Result<f64, LoadError> {
    let value = json_field(obj, column)?;
    value.as_f64().ok_or_else(|| invalid(row, column, value))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns named like the CSV header.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    let schema = builder.schema().clone();
    let cols = ColumnIndex::locate(|name| schema.index_of(name).ok())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let sites = batch.column(cols.site);
        let payloads = batch.column(cols.payload);
        let boosters = batch.column(cols.booster);
        let classes = batch.column(cols.class);

        for i in 0..batch.num_rows() {
            let row = records.len();
            records.push(LaunchRecord::new(
                string_at(sites, i, row, LAUNCH_SITE)?,
                number_at(payloads, i, row, PAYLOAD_MASS)?,
                string_at(boosters, i, row, BOOSTER_CATEGORY)?,
                outcome_from(number_at(classes, i, row, CLASS)?, row)?,
            ));
        }
    }

    Dataset::from_records(records)
}

// -- Arrow helpers --

/// Read a string cell. `i` indexes the batch, `row` the whole file.
fn string_at(col: &ArrayRef, i: usize, row: usize, column: &'static str) -> Result<String, LoadError> {
    if col.is_null(i) {
        return Err(invalid(row, column, "null"));
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(i).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(i).to_string()),
        other => Err(LoadError::ColumnType {
            column,
            found: format!("{other:?}"),
        }),
    }
}

/// Read a numeric cell as `f64`, whatever the physical integer/float type.
fn number_at(col: &ArrayRef, i: usize, row: usize, column: &'static str) -> Result<f64, LoadError> {
    if col.is_null(i) {
        return Err(invalid(row, column, "null"));
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(i)),
        DataType::Float32 => Ok(f64::from(col.as_primitive::<Float32Type>().value(i))),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(i) as f64),
        DataType::Int32 => Ok(f64::from(col.as_primitive::<Int32Type>().value(i))),
        other => Err(LoadError::ColumnType {
            column,
            found: format!("{other:?}"),
        }),
    }
}
