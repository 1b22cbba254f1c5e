//! The end-to-end scenario: five named stages run in order, first failure
//! aborts the rest.
//!
//! [`run`] returns a report instead of propagating errors so the caller can
//! release the browser session on every path, success or failure, exactly once.

use tracing::{error, info};

use crate::error::{QuizError, Result};
use crate::flow::{LOADING_PLACEHOLDER, QuizFlow, RunState, SubmitOutcome};
use crate::selectors::SelectorContract;
use crate::surface::UiSurface;
use crate::wait::WaitOptions;

/// Everything one run needs to know about its target.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
	/// Base URL of the quiz application.
	pub base_url: String,
	/// Landing page path appended to the base URL.
	pub landing_page: String,
	/// When set, the document title must contain this fragment.
	pub expect_title: Option<String>,
	/// Preferred answer marker; first candidate wins when absent.
	pub marker: Option<String>,
	pub selectors: SelectorContract,
	pub wait: WaitOptions,
	pub placeholder: String,
}

impl Default for ScenarioConfig {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8000/".to_string(),
			landing_page: "index.php".to_string(),
			expect_title: Some("Quiz".to_string()),
			marker: None,
			selectors: SelectorContract::default(),
			wait: WaitOptions::default(),
			placeholder: LOADING_PLACEHOLDER.to_string(),
		}
	}
}

impl ScenarioConfig {
	pub fn landing_url(&self) -> String {
		let base = self.base_url.trim_end_matches('/');
		format!("{base}/{}", self.landing_page)
	}
}

/// One named stage's outcome.
#[derive(Debug, Clone)]
pub struct StepReport {
	pub name: &'static str,
	pub passed: bool,
	/// True when the step failed because page state violated an invariant,
	/// as opposed to the channel breaking or a wait timing out.
	pub assertion: bool,
	pub detail: String,
}

/// Whole-run outcome: the steps that ran and the state the flow ended in.
#[derive(Debug, Clone)]
pub struct RunReport {
	pub steps: Vec<StepReport>,
	pub state: RunState,
}

impl RunReport {
	pub fn passed(&self) -> bool {
		!self.steps.is_empty() && self.steps.iter().all(|s| s.passed)
	}

	pub fn failure(&self) -> Option<&StepReport> {
		self.steps.iter().find(|s| !s.passed)
	}

	/// Records a step outcome. Returns whether the run may continue.
	fn record(&mut self, name: &'static str, outcome: Result<String>) -> bool {
		match outcome {
			Ok(detail) => {
				info!(target = "quizdrive", step = name, %detail, "step passed");
				self.steps.push(StepReport {
					name,
					passed: true,
					assertion: false,
					detail,
				});
				true
			}
			Err(err) => {
				error!(target = "quizdrive", step = name, error = %err, assertion = err.is_assertion(), "step failed");
				self.steps.push(StepReport {
					name,
					passed: false,
					assertion: err.is_assertion(),
					detail: err.to_string(),
				});
				false
			}
		}
	}
}

/// Runs the full scenario against an already-acquired surface.
///
/// Never tears the surface down and never early-returns an error; teardown
/// belongs to whoever owns the session.
pub async fn run<S: UiSurface + ?Sized>(surface: &S, config: &ScenarioConfig) -> RunReport {
	let mut flow = QuizFlow::new(surface)
		.with_selectors(config.selectors.clone())
		.with_wait(config.wait)
		.with_placeholder(config.placeholder.clone());
	let mut report = RunReport {
		steps: Vec::new(),
		state: flow.state(),
	};

	'steps: {
		let outcome = landing_step(&mut flow, surface, config).await;
		if !report.record("landing page", outcome) {
			break 'steps;
		}

		let outcome = flow.start().await.map(|question| format!("first question: {question}"));
		if !report.record("start quiz", outcome) {
			break 'steps;
		}

		let outcome = flow
			.answer_all(config.marker.as_deref())
			.await
			.map(|n| format!("answered {n} question(s)"));
		if !report.record("question navigation", outcome) {
			break 'steps;
		}

		let outcome = flow.submit().await.map(|o| match o {
			SubmitOutcome::Submitted => "submitted".to_string(),
			SubmitOutcome::AlreadySubmitted => "submit control absent or inert, treating as already submitted".to_string(),
		});
		if !report.record("submit", outcome) {
			break 'steps;
		}

		let outcome = flow.read_results().await.map(|snap| {
			format!(
				"score {}, {} correct, {} incorrect, {} total",
				snap.score, snap.correct, snap.incorrect, snap.total
			)
		});
		report.record("score check", outcome);
	}

	report.state = flow.state();
	report
}

async fn landing_step<S: UiSurface + ?Sized>(
	flow: &mut QuizFlow<'_, S>,
	surface: &S,
	config: &ScenarioConfig,
) -> Result<String> {
	flow.open(&config.landing_url()).await?;

	let url = surface.current_url().await?;
	let title = surface.title().await?;
	if !url.contains(&config.landing_page) {
		return Err(QuizError::Assertion(format!(
			"landed on {url:?}, expected path containing {:?}",
			config.landing_page
		)));
	}
	if let Some(fragment) = &config.expect_title {
		if !title.contains(fragment) {
			return Err(QuizError::Assertion(format!(
				"page title {title:?} does not contain {fragment:?}"
			)));
		}
	}
	Ok(format!("url {url}, title {title:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn landing_url_joins_without_double_slash() {
		let config = ScenarioConfig::default();
		assert_eq!(config.landing_url(), "http://localhost:8000/index.php");

		let config = ScenarioConfig {
			base_url: "http://localhost:8000".into(),
			..Default::default()
		};
		assert_eq!(config.landing_url(), "http://localhost:8000/index.php");
	}

	#[test]
	fn empty_report_has_not_passed() {
		let report = RunReport {
			steps: Vec::new(),
			state: RunState::Init,
		};
		assert!(!report.passed());
		assert!(report.failure().is_none());
	}
}
