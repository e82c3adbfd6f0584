use anyhow::Context;
use clap::{Parser, Subcommand};
use datatasks::abstractions::SystemResolver;
use datatasks::config::{Config, ConfigLoader};
use datatasks::error::{describe_error_code, ErrorCode};
use datatasks::plot::Chart;
use datatasks::tasks::{
    business_day, dns, parabola, performance, random_matrix, sum_of_squares, traffic, zscore,
};
use datatasks::TaskError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Small, self-contained data utilities
#[derive(Parser)]
#[command(name = "datatasks")]
#[command(about = "Run one of the datatasks utilities", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse-resolve IP addresses to hostnames
    Resolve {
        /// Addresses to look up; anything not shaped like an IPv4 address is skipped
        ips: Vec<String>,
    },
    /// Generate seeded daily team performance since a start time
    Performance {
        /// Start time in epoch milliseconds; must not be in the future
        #[arg(long)]
        start_ms: i64,

        /// Team name (repeatable); defaults to the configured teams
        #[arg(long = "team")]
        teams: Vec<String>,

        /// Random seed; defaults to the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write the chart to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Generate hourly traffic counts into traffic_data.csv
    Traffic {
        /// Number of hours to generate
        #[arg(long)]
        hours: usize,

        /// Directory for traffic_data.csv; defaults to the configured output_dir
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Write the chart to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Z-score normalize each column of a headerless numeric CSV file
    Zscore {
        file: PathBuf,
    },
    /// Print a random matrix of shape (a*b, c*d) with values in [1, 100)
    RandomMatrix {
        a: usize,
        b: usize,
        c: usize,
        d: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the next Monday-to-Friday date after DATE
    NextBusinessDay {
        date: String,
    },
    /// Sum of squares of 1..=10 prefixes sized by each sublist, e.g. '[[1,2,3],[4,5]]'
    SumSquares {
        lists: String,
    },
    /// Chart y = x^2 over [-10, 10]
    Parabola {
        /// Write the chart to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::new().load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_task_error(&e);
            std::process::exit(e.exit_code());
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("datatasks started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli.command, &config) {
        error!("Fatal error: {:#}", e);
        match e.downcast_ref::<TaskError>() {
            Some(task_err) => {
                report_task_error(task_err);
                std::process::exit(task_err.exit_code());
            }
            None => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

/// Print the user-facing message followed by the code and what it means
fn report_task_error(err: &TaskError) {
    eprintln!("Error: {}", err.user_message());
    eprintln!("  [E{:04}] {}", err.code(), describe_error_code(err.code()));
}

fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Resolve { ips } => {
            let hostnames = dns::resolve_hostnames(&ips, &SystemResolver::new());
            for (ip, host) in hostnames.iter() {
                println!("{}\t{}", ip, host.unwrap_or("-"));
            }
        }
        Commands::Performance {
            start_ms,
            teams,
            seed,
            svg,
        } => {
            let teams = if teams.is_empty() {
                config.default_teams.clone()
            } else {
                teams
            };
            let report = performance::generate_performance(
                start_ms,
                &teams,
                seed.unwrap_or(config.seed),
            )?;
            for (team, values) in report.data.iter() {
                let joined: Vec<String> = values.iter().map(|v| format!("{:.6}", v)).collect();
                println!("{}\t{}", team, joined.join(","));
            }
            save_chart(&report.chart, svg.as_deref())?;
        }
        Commands::Traffic {
            hours,
            output_dir,
            svg,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let report = traffic::generate_traffic(hours, &dir, &mut rand::rng())?;
            println!("{}", report.path.display());
            match &report.chart {
                Some(chart) => save_chart(chart, svg.as_deref())?,
                None => println!("No data to plot"),
            }
        }
        Commands::Zscore { file } => {
            let rows = read_numeric_csv(&file)?;
            let normalized = zscore::normalize(&zscore::matrix_from_rows(rows)?);
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in normalized.rows() {
                writer.write_record(row.iter().map(|v| format!("{:.6}", v)))?;
            }
            writer.flush()?;
        }
        Commands::RandomMatrix { a, b, c, d, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let matrix = random_matrix::random_matrix([[a, b], [c, d]], &mut rng)?;
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in matrix.rows() {
                writer.write_record(row.iter().map(|v| v.to_string()))?;
            }
            writer.flush()?;
        }
        Commands::NextBusinessDay { date } => {
            let next = business_day::next_business_day(&date)?;
            println!("{}", next.format("%Y-%m-%d %H:%M:%S"));
        }
        Commands::SumSquares { lists } => {
            let lists: Vec<Vec<serde_json::Value>> =
                serde_json::from_str(&lists).map_err(|e| {
                    TaskError::parse(
                        ErrorCode::PARSE_GENERIC,
                        format!("Expected a JSON list of lists: {}", e),
                        lists.as_str(),
                    )
                    .with_source(e)
                })?;
            let sums = sum_of_squares::sum_of_squares(&lists);
            println!("{}", serde_json::to_string(&sums)?);
        }
        Commands::Parabola { svg } => {
            let chart = parabola::parabola_chart();
            save_chart(&chart, svg.as_deref())?;
        }
    }

    Ok(())
}

fn save_chart(chart: &Chart, svg: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = svg {
        chart.save_svg(path)?;
        println!("Chart written to {}", path.display());
    }
    Ok(())
}

fn read_numeric_csv(path: &Path) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                field.trim().parse::<f64>().with_context(|| {
                    format!("Non-numeric value {:?} on line {}", field, line + 1)
                })
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}
