use std::process::ExitCode;

use clap::Parser;
use errand_admin::cli::Cli;
use errand_admin::logging::init_logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; flags and the process environment still apply.
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.settings.log_format);

    match errand_admin::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
