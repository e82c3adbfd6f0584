//! Hourly traffic counts written to CSV, reloaded and charted

use crate::error::{Result, TaskError};
use crate::plot::{Chart, Series};
use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const VEHICLE_TYPES: [&str; 4] = ["Car", "Bus", "Truck", "Bike"];
pub const TRAFFIC_FILE_NAME: &str = "traffic_data.csv";
pub const MAX_VEHICLE_COUNT: u32 = 50;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One generated hour of traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrafficRecord {
    pub time: String,
    pub car: u32,
    pub bus: u32,
    pub truck: u32,
    pub bike: u32,
}

impl TrafficRecord {
    /// Counts in `VEHICLE_TYPES` order
    pub fn counts(&self) -> [u32; 4] {
        [self.car, self.bus, self.truck, self.bike]
    }
}

#[derive(Debug, Clone)]
pub struct TrafficReport {
    pub path: PathBuf,
    pub records: Vec<TrafficRecord>,
    /// Absent when no rows were generated
    pub chart: Option<Chart>,
}

/// Path of the traffic file inside `output_dir`
pub fn traffic_file_path(output_dir: &Path) -> PathBuf {
    output_dir.join(TRAFFIC_FILE_NAME)
}

/// Generate `hours` rows of random vehicle counts, write them to
/// `<output_dir>/traffic_data.csv`, reload the file and chart it.
pub fn generate_traffic<R: Rng>(
    hours: usize,
    output_dir: &Path,
    rng: &mut R,
) -> Result<TrafficReport> {
    if !output_dir.exists() {
        debug!("Creating output directory {}", output_dir.display());
        fs::create_dir_all(output_dir).map_err(|e| TaskError::from(e).with_path(output_dir))?;
    }
    let path = traffic_file_path(output_dir);

    let rows: Vec<TrafficRecord> = (0..hours)
        .map(|_| TrafficRecord {
            time: Local::now().format(TIME_FORMAT).to_string(),
            car: rng.random_range(0..=MAX_VEHICLE_COUNT),
            bus: rng.random_range(0..=MAX_VEHICLE_COUNT),
            truck: rng.random_range(0..=MAX_VEHICLE_COUNT),
            bike: rng.random_range(0..=MAX_VEHICLE_COUNT),
        })
        .collect();

    write_traffic(&path, &rows)?;
    info!("Wrote {} hours of traffic data to {}", hours, path.display());

    let records = read_traffic(&path)?;
    if records.is_empty() {
        debug!("No traffic rows, skipping chart");
        return Ok(TrafficReport {
            path,
            records,
            chart: None,
        });
    }

    let chart = traffic_chart(&records);
    Ok(TrafficReport {
        path,
        records,
        chart: Some(chart),
    })
}

/// Overwrite `path` with a header row and one row per record
pub fn write_traffic(path: &Path, records: &[TrafficRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| TaskError::from(e).with_path(path))?;

    // serde only emits the header alongside the first record
    if records.is_empty() {
        let mut header = vec!["Time"];
        header.extend(VEHICLE_TYPES);
        writer.write_record(&header)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load traffic rows back from a CSV file with a `Time,Car,Bus,Truck,Bike` header
pub fn read_traffic(path: &Path) -> Result<Vec<TrafficRecord>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| TaskError::from(e).with_path(path))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: TrafficRecord = row.map_err(|e| TaskError::from(e).with_path(path))?;
        records.push(record);
    }
    Ok(records)
}

fn traffic_chart(records: &[TrafficRecord]) -> Chart {
    let times = records.iter().map(|r| r.time.clone()).collect();
    let mut chart = Chart::new()
        .with_title("Traffic Data Over Time")
        .with_axis_labels("Time", "Vehicle Count")
        .with_legend(true)
        .with_x_tick_labels(times);

    for (idx, vehicle) in VEHICLE_TYPES.iter().enumerate() {
        let counts: Vec<f64> = records.iter().map(|r| r.counts()[idx] as f64).collect();
        chart = chart.add_series(Series::from_values(*vehicle, &counts));
    }
    chart
}
