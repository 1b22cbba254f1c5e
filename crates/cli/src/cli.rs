use std::path::PathBuf;

use clap::Parser;
use quizdrive::{CdpConfig, ScenarioConfig, WaitOptions};

/// Root CLI for quizdrive.
#[derive(Parser, Debug)]
#[command(name = "quizdrive")]
#[command(about = "End-to-end checks for the quiz web application")]
#[command(version)]
pub struct Cli {
	/// Base URL of the quiz application.
	#[arg(value_name = "URL", default_value = "http://localhost:8000/")]
	pub base_url: String,

	/// Landing page path under the base URL.
	#[arg(long, default_value = "index.php")]
	pub landing: String,

	/// Expected document title fragment on the landing page.
	#[arg(long, default_value = "Quiz")]
	pub title: String,

	/// Preferred answer text; the first candidate is used when nothing matches.
	#[arg(short, long, value_name = "TEXT")]
	pub marker: Option<String>,

	/// Bound on every wait, in milliseconds.
	#[arg(long, value_name = "MS", default_value_t = 30_000)]
	pub timeout_ms: u64,

	/// Run with a visible browser window.
	#[arg(long)]
	pub headed: bool,

	/// Chrome executable override.
	#[arg(long, value_name = "PATH")]
	pub chrome: Option<PathBuf>,

	/// Disable the Chrome sandbox (needed inside most containers).
	#[arg(long)]
	pub no_sandbox: bool,

	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl Cli {
	pub fn scenario_config(&self) -> ScenarioConfig {
		ScenarioConfig {
			base_url: self.base_url.clone(),
			landing_page: self.landing.clone(),
			expect_title: Some(self.title.clone()),
			marker: self.marker.clone(),
			wait: WaitOptions::with_timeout_ms(self.timeout_ms),
			..Default::default()
		}
	}

	pub fn cdp_config(&self) -> CdpConfig {
		CdpConfig {
			headless: !self.headed,
			chrome: self.chrome.clone(),
			no_sandbox: self.no_sandbox,
			..Default::default()
		}
	}
}
