use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use launch_dash::data::{BOOSTER_CATEGORY, CLASS, LAUNCH_SITE, PAYLOAD_MASS};

/// Write a synthetic launch records file for trying out the dashboard.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of launches to generate
    #[arg(long, default_value_t = 56)]
    records: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output path; the extension picks the format (.parquet or .csv)
    #[arg(long, default_value = "spacex_launch_dash.parquet")]
    output: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Pad name and its base success probability.
const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.27),
    ("CCAFS SLC-40", 0.43),
    ("KSC LC-39A", 0.77),
    ("VAFB SLC-4E", 0.40),
];

/// Booster category, payload envelope in kg, reliability bonus.
const BOOSTERS: [(&str, f64, f64, f64); 5] = [
    ("v1.0", 0.0, 700.0, -0.2),
    ("v1.1", 500.0, 4500.0, -0.1),
    ("FT", 2000.0, 9600.0, 0.2),
    ("B4", 2000.0, 6000.0, 0.15),
    ("B5", 3000.0, 15600.0, 0.3),
];

struct Columns {
    site: Vec<String>,
    payload: Vec<f64>,
    booster: Vec<String>,
    class: Vec<i64>,
}

fn generate(records: usize, rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns {
        site: Vec::with_capacity(records),
        payload: Vec::with_capacity(records),
        booster: Vec::with_capacity(records),
        class: Vec::with_capacity(records),
    };

    for _ in 0..records {
        let &(site, base_rate) = rng.pick(&SITES);
        let &(booster, lo, hi, bonus) = rng.pick(&BOOSTERS);
        let payload = (lo + rng.next_f64() * (hi - lo)).round();
        let success = rng.next_f64() < (base_rate + bonus).clamp(0.05, 0.95);

        cols.site.push(site.to_string());
        cols.payload.push(payload);
        cols.booster.push(booster.to_string());
        cols.class.push(i64::from(success));
    }
    cols
}

fn write_parquet(path: &Path, cols: Columns) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(LAUNCH_SITE, DataType::Utf8, false),
        Field::new(PAYLOAD_MASS, DataType::Float64, false),
        Field::new(BOOSTER_CATEGORY, DataType::Utf8, false),
        Field::new(CLASS, DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.site)),
            Arc::new(Float64Array::from(cols.payload)),
            Arc::new(StringArray::from(cols.booster)),
            Arc::new(Int64Array::from(cols.class)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(path: &Path, cols: Columns) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    writer.write_record([LAUNCH_SITE, PAYLOAD_MASS, BOOSTER_CATEGORY, CLASS])?;
    for i in 0..cols.site.len() {
        writer.write_record([
            cols.site[i].clone(),
            cols.payload[i].to_string(),
            cols.booster[i].clone(),
            cols.class[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let cols = generate(args.records, &mut rng);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&args.output, cols)?,
        "csv" => write_csv(&args.output, cols)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("wrote {} launches to {}", args.records, args.output.display());
    println!("Wrote {} launch records to {}", args.records, args.output.display());
    Ok(())
}
