use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use sbb_network::cli::{Cli, run};
use sbb_network::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let output = cli.output.clone();

    match run(cli).await {
        Ok(stats) => {
            info!(
                output = %output.display(),
                edges = stats.edges,
                failed_queries = stats.failed,
                "network build complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "network build failed");
            ExitCode::FAILURE
        }
    }
}
