//! Human-facing pass/fail banners for a scenario run.

use colored::Colorize;
use quizdrive::{QuizError, RunReport};

pub fn print_header(landing_url: &str) {
	println!("{}", "=".repeat(50));
	println!("{} {}", "quiz application e2e".bold(), landing_url.cyan());
	println!("{}", "=".repeat(50));
}

pub fn print_report(report: &RunReport) {
	for step in &report.steps {
		if step.passed {
			println!("{} {} {} {}", "✓".green().bold(), step.name.bold(), "—".dimmed(), step.detail);
		} else {
			let kind = if step.assertion { "[page state]" } else { "[infrastructure]" };
			println!(
				"{} {} {} {} {}",
				"✗".red().bold(),
				step.name.bold(),
				"—".dimmed(),
				step.detail.red(),
				kind.dimmed()
			);
		}
	}

	println!("{}", "=".repeat(50));
	if report.passed() {
		println!("{} (final state: {:?})", "ALL CHECKS PASSED".green().bold(), report.state);
	} else {
		let failed = report.failure().map(|s| s.name).unwrap_or("no steps ran");
		println!("{} {}", "RUN FAILED:".red().bold(), failed.red());
	}
	println!("{}", "=".repeat(50));
}

pub fn print_fatal(err: &QuizError) {
	eprintln!("{} {}", "error:".red().bold(), err);
}
