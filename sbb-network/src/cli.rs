//! Command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use crate::domain::{StationName, TimeOfDay};
use crate::network::{
    ConfigError, NetworkConfig, OutputError, QuerySpace, RunStats, SampleRun, Timetable,
    build_network, write_csv,
};
use crate::timetable::{MockTimetable, TimetableClient, TimetableConfig, TimetableError};

/// Sample the SBB network into a table of stop-to-stop edges.
#[derive(Debug, Parser)]
#[command(name = "sbb-network", version)]
pub struct Cli {
    /// TOML file with start, end, stations, times, limit and concurrency.
    /// Overrides the corresponding flags.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First sampled date
    #[arg(long, default_value = "2020-03-09")]
    pub start: NaiveDate,

    /// End of the sampled range, exclusive
    #[arg(long, default_value = "2020-05-05")]
    pub end: NaiveDate,

    /// Station to sample; repeat or separate with commas
    #[arg(
        long = "station",
        value_name = "NAME",
        value_delimiter = ',',
        default_values = ["Basel", "Zürich", "Luzern", "Bern", "Genf", "Locarno", "Davos"]
    )]
    pub stations: Vec<StationName>,

    /// Departure time (HH:MM) to query; repeat or separate with commas
    #[arg(
        long = "time",
        value_name = "HH:MM",
        value_delimiter = ',',
        default_values = ["00:00", "09:00", "13:00", "17:00", "21:00"]
    )]
    pub times: Vec<TimeOfDay>,

    /// Journeys requested per query
    #[arg(long, default_value_t = crate::network::DEFAULT_LIMIT)]
    pub limit: u8,

    /// Queries in flight at once
    #[arg(long, default_value_t = crate::network::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output CSV path
    #[arg(long, short, default_value = "sbb_network_output.csv")]
    pub output: PathBuf,

    /// Timetable API base URL
    #[arg(long, default_value = "https://transport.opendata.ch/v1")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Answer queries from saved responses (`Origin__Destination.json`)
    /// instead of the live API
    #[arg(long, value_name = "DIR")]
    pub mock_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("timetable setup failed: {0}")]
    Timetable(#[from] TimetableError),

    #[error("failed to write output: {0}")]
    Output(#[from] OutputError),
}

impl Cli {
    /// Build the run configuration from the config file or the flags.
    pub fn network_config(&self) -> Result<NetworkConfig, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let config = match &self.config {
            Some(path) => NetworkConfig::from_file(path)?,
            None => NetworkConfig::new(QuerySpace::new(self.start, self.end, self.stations.clone()))
                .with_times(self.times.clone())
                .with_limit(self.limit)
                .with_concurrency(self.concurrency),
        };
        config.validate()?;
        Ok(config)
    }

    fn timetable_config(&self, config: &NetworkConfig) -> TimetableConfig {
        TimetableConfig::new()
            .with_base_url(&self.base_url)
            .with_max_concurrent(config.concurrency)
            .with_timeout(self.timeout)
    }
}

/// Run the whole pipeline and write the CSV.
pub async fn run(cli: Cli) -> Result<RunStats, CliError> {
    let config = cli.network_config()?;
    info!(
        stations = config.query_space.stations.len(),
        start = %config.query_space.start,
        end = %config.query_space.end,
        queries = config.query_count(),
        "starting network build"
    );

    let run = match &cli.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using saved responses");
            sample(&MockTimetable::from_dir(dir)?, &config).await?
        }
        None => {
            let client = TimetableClient::new(cli.timetable_config(&config))?;
            sample(&client, &config).await?
        }
    };

    write_csv(&run.table, &cli.output)?;
    Ok(run.stats)
}

async fn sample<T: Timetable>(timetable: &T, config: &NetworkConfig) -> Result<SampleRun, CliError> {
    Ok(build_network(timetable, config).await?)
}
