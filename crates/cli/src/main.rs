mod cli;
mod logging;
mod report;

use clap::Parser;
use quizdrive::{CdpSurface, scenario};

use crate::cli::Cli;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match run(cli).await {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			report::print_fatal(&err);
			std::process::exit(1);
		}
	}
}

async fn run(cli: Cli) -> quizdrive::Result<bool> {
	let config = cli.scenario_config();
	report::print_header(&config.landing_url());

	let surface = CdpSurface::launch(cli.cdp_config()).await?;

	// run() returns a report instead of propagating, so the session is
	// released on every path, exactly once.
	let outcome = scenario::run(&surface, &config).await;
	let closed = surface.close().await;

	report::print_report(&outcome);
	closed?;
	Ok(outcome.passed())
}
