use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use zigzag_tsp::{Params, SegmentSearch, TspInstance, DEFAULT_PARAMS};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Approximate Euclidean TSP solver using radial segmentation.")]
pub struct Args {
    /// Path to the input file; reads stdin if omitted
    pub file: Option<String>,

    /// Inputs with at least this many points skip the segment search
    #[arg(long, default_value_t = DEFAULT_PARAMS.size_threshold)]
    pub threshold: usize,

    /// Segment counts to try for small inputs, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PARAMS.search_grid.clone())]
    pub grid: Vec<usize>,

    /// Large inputs: base segment count
    #[arg(long, default_value_t = DEFAULT_PARAMS.large_base)]
    pub base: usize,

    /// Large inputs: segments added per divisor points past the threshold
    #[arg(long, default_value_t = DEFAULT_PARAMS.large_step)]
    pub step: usize,

    /// Large inputs: points per step
    #[arg(long, default_value_t = DEFAULT_PARAMS.large_divisor)]
    pub divisor: usize,

    /// Also write the solution to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log level; RUST_LOG still takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl Args {
    fn params(&self) -> Params {
        Params {
            size_threshold: self.threshold,
            search_grid: self.grid.clone(),
            large_base: self.base,
            large_step: self.step,
            large_divisor: self.divisor,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter(None, args.log_level.to_filter())
        .parse_default_env()
        .init();

    let params = args.params();
    log::info!("{}", params);
    let search = SegmentSearch::new(params)?;

    let mut instance = match &args.file {
        Some(file) => TspInstance::from_file(file)
            .with_context(|| format!("failed to read instance {}", file))?,
        None => TspInstance::from_stdin().context("failed to read instance from stdin")?,
    };
    log::info!(
        "Starting solver on instance: {} ({} points)",
        instance.instance_name,
        instance.n_points()
    );

    let solution = search.solve(&mut instance)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    solution.tour.write_solution(&instance.points, &mut out)?;
    out.flush()?;

    if let Some(file) = &args.output {
        solution
            .tour
            .save_solution(&instance.points, file)
            .with_context(|| format!("failed to write solution {}", file))?;
    }

    log::info!("Total runtime: {:.3?}", instance.start_time.elapsed());
    Ok(())
}
