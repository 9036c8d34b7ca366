use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CSV_PATH: &str = "spacex_launch_dash.csv";
const PARQUET_PATH: &str = "spacex_launch_dash.parquet";
const FLIGHTS: i64 = 56;

/// Same header layout as the published launch table, leading index included.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "")]
    index: i64,
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// splitmix64; deterministic so regenerated files diff cleanly.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn booster_category(flight: i64) -> &'static str {
    match flight {
        1..=5 => "v1.0",
        6..=20 => "v1.1",
        21..=44 => "FT",
        45..=50 => "B4",
        _ => "B5",
    }
}

fn generate(rng: &mut SplitMix) -> Vec<Row> {
    let early_sites = ["CCAFS LC-40", "VAFB SLC-4E"];
    let later_sites = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

    (1..=FLIGHTS)
        .map(|flight| {
            let launch_site = if flight <= 25 {
                *rng.pick(&early_sites)
            } else {
                *rng.pick(&later_sites)
            };
            // Early flights carried little; heavy payloads arrive with newer boosters.
            let ceiling = 2000.0 + 14000.0 * flight as f64 / FLIGHTS as f64;
            let payload_mass_kg = if flight <= 2 {
                0.0
            } else {
                (rng.unit() * ceiling / 10.0).round() * 10.0
            };
            let success_rate = 0.2 + 0.7 * flight as f64 / FLIGHTS as f64;
            let class = i64::from(rng.unit() < success_rate);
            let booster_category = booster_category(flight);

            Row {
                index: flight - 1,
                flight_number: flight,
                launch_site,
                class,
                payload_mass_kg,
                booster_version: format!("F9 {booster_category} B{}", 1000 + flight),
                booster_category,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category),
            )),
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

fn write_parquet(batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);
    let rows = generate(&mut rng);

    write_csv(&rows)?;
    let batch = to_batch(&rows)?;
    write_parquet(&batch)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!("Wrote {} launches to {CSV_PATH} and {PARQUET_PATH}", rows.len());
    Ok(())
}
