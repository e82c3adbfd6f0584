//! Synthetic daily team-performance series
//!
//! Generates one uniform draw in `[0.1, 1.0]` per team per day, from a start
//! timestamp up to now, and plots one line per team.

use crate::error::{ErrorCode, Result, TaskError};
use crate::plot::{Chart, Series};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_TEAMS: [&str; 5] = ["Team1", "Team2", "Team3", "Team4", "Team5"];
pub const DEFAULT_SEED: u64 = 0;

const MIN_PERFORMANCE: f64 = 0.1;
const MAX_PERFORMANCE: f64 = 1.0;

pub fn default_teams() -> Vec<String> {
    DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect()
}

/// Convert an untyped team list into names, rejecting anything that is not text
pub fn teams_from_value(value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| TaskError::invalid_type("Expected teams to be list of str"))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                TaskError::invalid_type(format!(
                    "Expected teams to be list of str, found {}",
                    item
                ))
            })
        })
        .collect()
}

/// Per-team daily values, in the order teams were given
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceData {
    teams: Vec<(String, Vec<f64>)>,
}

impl PerformanceData {
    pub fn get(&self, team: &str) -> Option<&[f64]> {
        self.teams
            .iter()
            .find(|(name, _)| name == team)
            .map(|(_, values)| values.as_slice())
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.teams
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceReport {
    pub data: PerformanceData,
    pub chart: Chart,
    pub start: DateTime<Utc>,
    pub days: usize,
}

/// Generate performance series from `epoch_millis` until now
pub fn generate_performance(
    epoch_millis: i64,
    teams: &[String],
    seed: u64,
) -> Result<PerformanceReport> {
    generate_performance_at(epoch_millis, teams, seed, Utc::now())
}

/// Same as [`generate_performance`] with an explicit "now"
pub fn generate_performance_at(
    epoch_millis: i64,
    teams: &[String],
    seed: u64,
    now: DateTime<Utc>,
) -> Result<PerformanceReport> {
    let start = DateTime::<Utc>::from_timestamp_millis(epoch_millis).ok_or_else(|| {
        TaskError::validation_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            format!("Epoch timestamp {} is out of range", epoch_millis),
            Some("epoch_millis".to_string()),
        )
    })?;

    if start > now {
        return Err(TaskError::validation_with_code(
            ErrorCode::VALIDATION_OUT_OF_RANGE,
            "Input epoch timestamp is in the future!",
            Some("epoch_millis".to_string()),
        ));
    }

    let days = (now - start).num_days() as usize;
    debug!(%start, days, teams = teams.len(), seed, "Generating performance data");

    let mut names: Vec<&str> = Vec::with_capacity(teams.len());
    for team in teams {
        if !names.contains(&team.as_str()) {
            names.push(team);
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut series: Vec<Vec<f64>> = vec![Vec::with_capacity(days); names.len()];
    for _day in 0..days {
        for values in series.iter_mut() {
            values.push(rng.random_range(MIN_PERFORMANCE..=MAX_PERFORMANCE));
        }
    }

    let data = PerformanceData {
        teams: names
            .into_iter()
            .map(str::to_string)
            .zip(series)
            .collect(),
    };

    let chart = performance_chart(&data, start);
    info!("Generated {} days of performance for {} teams", days, data.len());

    Ok(PerformanceReport {
        data,
        chart,
        start,
        days,
    })
}

fn performance_chart(data: &PerformanceData, start: DateTime<Utc>) -> Chart {
    let x_label = format!("Days since {}", start.format("%Y-%m-%d %H:%M:%S"));
    data.iter().fold(
        Chart::new()
            .with_axis_labels(x_label, "Performance")
            .with_legend(true),
        |chart, (team, values)| chart.add_series(Series::from_values(team, values)),
    )
}
