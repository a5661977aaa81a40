mod cli;
mod config;
mod driver;
mod error;
mod logging;
mod report;

use crate::cli::Cli;
use crate::config::PartialConfig;
use crate::error::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::{debug, info};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run_app(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("sasakit CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = PartialConfig::resolve(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();

    let result = driver::run(&cli.paths, &config, cli.keep_going, &mut out, &mut err);
    out.flush()?;

    match &result {
        Ok(summary) => info!(
            "Processed {} structure(s) successfully.",
            summary.succeeded
        ),
        Err(e) => debug!("Run failed: {}", e),
    }
    result.map(|_| ())
}
