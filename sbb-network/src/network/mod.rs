//! Network sampling.
//!
//! Turns a query space into a table of stop-to-stop edges:
//!
//! 1. [`QuerySpace::combinations`] lists every (origin, destination, date)
//! 2. [`Sampler`] queries each combination at every configured time of day
//! 3. [`build_edges`] flattens each answer into edge records
//! 4. [`write_csv`] exports the accumulated [`NetworkTable`]

mod combinations;
mod config;
mod edges;
mod output;
mod sampler;

pub use combinations::{QuerySpace, SAMPLE_INTERVAL_DAYS, generate_combinations};
pub use config::{
    ConfigError, DEFAULT_CONCURRENCY, DEFAULT_LIMIT, MAX_LIMIT, NetworkConfig,
    default_sample_times,
};
pub use edges::{
    END_STATION, EdgeBatch, EdgeError, EdgeRecord, MISSING, NetworkTable, NextStop, WithNextStop,
    build_edges, with_next_stop,
};
pub use output::{HEADER, OutputError, write_csv, write_table};
pub use sampler::{RunStats, SampleRun, Sampler, Timetable};

/// Validate `config`, then sample every combination it describes.
///
/// Fails only on invalid configuration. Query failures are counted in the
/// returned stats.
pub async fn build_network<T: Timetable>(
    timetable: &T,
    config: &NetworkConfig,
) -> Result<SampleRun, ConfigError> {
    config.validate()?;
    let combinations = config.query_space.combinations();
    Ok(Sampler::new(timetable, config).run(&combinations).await)
}
