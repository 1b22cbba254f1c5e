//! Full-scenario tests against a scripted in-memory page.
//!
//! The fake models the quiz application's observable behavior: controls appear
//! and disappear as the run progresses, question text settles only after a few
//! polls, and result fields populate with a delay after submission.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use quizdrive::{
	ElementSnapshot, QuizError, Result, RunReport, RunState, ScenarioConfig, UiSurface, WaitOptions, scenario,
};

const OPTIONS: [&str; 3] = ["Paris", "3", "42"];

#[derive(Debug, Clone)]
struct FakeConfig {
	total_questions: u32,
	/// Polls of the question region that serve the placeholder before the
	/// real text appears.
	settle_polls: u32,
	/// Question text never leaves the placeholder.
	never_settle: bool,
	/// This question presents zero answer candidates.
	no_options_on: Option<u32>,
	/// Last question shows a disabled next control alongside submit.
	inert_next_on_last: bool,
	/// Page auto-submits: no submit control, results appear once the last
	/// question is answered.
	auto_submit: bool,
	/// (score, correct, incorrect, total) shown on the results view.
	results: (&'static str, u32, u32, u32),
	/// Polls of the score region that serve empty text after submission.
	results_delay_polls: u32,
}

impl Default for FakeConfig {
	fn default() -> Self {
		Self {
			total_questions: 3,
			settle_polls: 2,
			never_settle: false,
			no_options_on: None,
			inert_next_on_last: false,
			auto_submit: false,
			results: ("67%", 2, 1, 3),
			results_delay_polls: 1,
		}
	}
}

#[derive(Debug, Default)]
struct PageModel {
	landed: bool,
	started: bool,
	question: u32,
	answered: u32,
	placeholder_served: u32,
	submitted: bool,
	score_polls_served: u32,
	answers: Vec<String>,
}

struct FakeSurface {
	config: FakeConfig,
	model: Mutex<PageModel>,
}

impl FakeSurface {
	fn new(config: FakeConfig) -> Self {
		Self {
			config,
			model: Mutex::new(PageModel::default()),
		}
	}

	fn answers(&self) -> Vec<String> {
		self.model.lock().unwrap().answers.clone()
	}

	fn results_visible(&self, model: &PageModel) -> bool {
		model.submitted || (self.config.auto_submit && model.answered >= self.config.total_questions)
	}
}

#[async_trait]
impl UiSurface for FakeSurface {
	async fn navigate(&self, _url: &str) -> Result<()> {
		self.model.lock().unwrap().landed = true;
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		Ok("http://localhost:8000/index.php".to_string())
	}

	async fn title(&self) -> Result<String> {
		Ok("Quiz Application".to_string())
	}

	async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
		let mut model = self.model.lock().unwrap();
		let snapshots = match selector {
			"#category" | "#difficulty" | "#startQuizBtn" if model.landed => {
				vec![ElementSnapshot::new("")]
			}
			"#questionText" if model.started => {
				let text = if self.config.never_settle || model.placeholder_served < self.config.settle_polls {
					model.placeholder_served += 1;
					"Loading question...".to_string()
				} else {
					format!("Question {}: what is the answer?", model.question)
				};
				vec![ElementSnapshot::new(text)]
			}
			".option-item" if model.started && !self.results_visible(&model) => {
				if self.config.no_options_on == Some(model.question) {
					Vec::new()
				} else {
					OPTIONS.iter().map(|o| ElementSnapshot::new(*o)).collect()
				}
			}
			"#nextBtn" if model.started && !model.submitted => {
				if model.question < self.config.total_questions {
					vec![ElementSnapshot::new("Next")]
				} else if self.config.inert_next_on_last {
					vec![ElementSnapshot {
						text: "Next".to_string(),
						visible: true,
						enabled: false,
					}]
				} else {
					Vec::new()
				}
			}
			"#submitBtn"
				if model.started
					&& !model.submitted && !self.config.auto_submit
					&& model.question == self.config.total_questions =>
			{
				vec![ElementSnapshot::new("Submit")]
			}
			"#scoreValue" if self.results_visible(&model) => {
				let text = if model.score_polls_served < self.config.results_delay_polls {
					model.score_polls_served += 1;
					String::new()
				} else {
					self.config.results.0.to_string()
				};
				vec![ElementSnapshot::new(text)]
			}
			"#correctCount" if self.results_visible(&model) => {
				vec![ElementSnapshot::new(self.config.results.1.to_string())]
			}
			"#incorrectCount" if self.results_visible(&model) => {
				vec![ElementSnapshot::new(self.config.results.2.to_string())]
			}
			"#totalQuestions" if self.results_visible(&model) => {
				vec![ElementSnapshot::new(self.config.results.3.to_string())]
			}
			_ => Vec::new(),
		};
		Ok(snapshots)
	}

	async fn click(&self, selector: &str, index: usize) -> Result<()> {
		let mut model = self.model.lock().unwrap();
		match selector {
			"#startQuizBtn" => {
				model.started = true;
				model.question = 1;
				model.placeholder_served = 0;
			}
			".option-item" => {
				let Some(text) = OPTIONS.get(index) else {
					return Err(QuizError::ElementNotFound {
						selector: selector.to_string(),
					});
				};
				model.answers.push((*text).to_string());
				model.answered = model.answered.max(model.question);
			}
			"#nextBtn" => {
				model.question += 1;
				model.placeholder_served = 0;
			}
			"#submitBtn" => {
				model.submitted = true;
			}
			_ => {
				return Err(QuizError::ElementNotFound {
					selector: selector.to_string(),
				});
			}
		}
		Ok(())
	}
}

fn fast_config() -> ScenarioConfig {
	ScenarioConfig {
		wait: WaitOptions {
			timeout: std::time::Duration::from_millis(500),
			initial_interval: std::time::Duration::from_millis(2),
			max_interval: std::time::Duration::from_millis(10),
		},
		..Default::default()
	}
}

fn step_names(report: &RunReport) -> Vec<&'static str> {
	report.steps.iter().map(|s| s.name).collect()
}

#[tokio::test]
async fn happy_path_answers_every_question_and_verifies_score() {
	let fake = FakeSurface::new(FakeConfig {
		inert_next_on_last: true,
		..Default::default()
	});
	let config = ScenarioConfig {
		marker: Some("3".to_string()),
		..fast_config()
	};

	let report = scenario::run(&fake, &config).await;

	assert!(report.passed(), "run failed: {:?}", report.failure());
	assert_eq!(
		step_names(&report),
		["landing page", "start quiz", "question navigation", "submit", "score check"]
	);
	assert_eq!(report.state, RunState::Scored);

	let navigation = &report.steps[2];
	assert_eq!(navigation.detail, "answered 3 question(s)");
	let score = &report.steps[4];
	assert!(score.detail.contains("score 67%"), "detail: {}", score.detail);

	// The marker matched the "3" candidate on every question.
	assert_eq!(fake.answers(), ["3", "3", "3"]);
}

#[tokio::test]
async fn falls_back_to_first_candidate_without_marker() {
	let fake = FakeSurface::new(FakeConfig::default());
	let report = scenario::run(&fake, &fast_config()).await;

	assert!(report.passed(), "run failed: {:?}", report.failure());
	assert_eq!(fake.answers(), ["Paris", "Paris", "Paris"]);
}

#[tokio::test]
async fn zero_answer_candidates_is_a_hard_failure() {
	let fake = FakeSurface::new(FakeConfig {
		no_options_on: Some(2),
		..Default::default()
	});
	let report = scenario::run(&fake, &fast_config()).await;

	assert!(!report.passed());
	assert_eq!(step_names(&report), ["landing page", "start quiz", "question navigation"]);
	let failure = report.failure().unwrap();
	assert_eq!(failure.name, "question navigation");
	assert!(failure.detail.contains("no answer candidates"), "detail: {}", failure.detail);
	assert!(failure.assertion, "zero candidates is a page-state failure");
	// No click was attempted on the empty candidate list.
	assert_eq!(fake.answers().len(), 1);
}

#[tokio::test]
async fn missing_submit_control_is_reported_not_fatal() {
	let fake = FakeSurface::new(FakeConfig {
		total_questions: 1,
		auto_submit: true,
		results: ("100%", 1, 0, 1),
		..Default::default()
	});
	let report = scenario::run(&fake, &fast_config()).await;

	assert!(report.passed(), "run failed: {:?}", report.failure());
	assert_eq!(report.state, RunState::ScoredWithoutSubmit);
	let submit = &report.steps[3];
	assert!(submit.detail.contains("already submitted"), "detail: {}", submit.detail);
}

#[tokio::test]
async fn placeholder_that_never_settles_times_out() {
	let fake = FakeSurface::new(FakeConfig {
		never_settle: true,
		..Default::default()
	});
	let report = scenario::run(&fake, &fast_config()).await;

	assert!(!report.passed());
	assert_eq!(step_names(&report), ["landing page", "start quiz"]);
	let failure = report.failure().unwrap();
	assert!(failure.detail.contains("timeout"), "detail: {}", failure.detail);
	assert!(failure.detail.contains("question 1 text settled"), "detail: {}", failure.detail);
	assert!(!failure.assertion, "a timeout is not a page-state failure");
}

#[tokio::test]
async fn mismatched_counts_fail_the_score_check() {
	let fake = FakeSurface::new(FakeConfig {
		results: ("67%", 2, 2, 3),
		..Default::default()
	});
	let report = scenario::run(&fake, &fast_config()).await;

	assert!(!report.passed());
	let failure = report.failure().unwrap();
	assert_eq!(failure.name, "score check");
	assert!(failure.detail.contains("do not add up"), "detail: {}", failure.detail);
	assert!(failure.assertion, "count mismatch is a page-state failure");
}

#[tokio::test]
async fn teardown_runs_exactly_once_on_success_and_on_failure() {
	// Mirrors the CLI's orchestration: run returns a report instead of
	// propagating, so the session release after it is unconditional.
	async fn run_and_release(fake: &FakeSurface, config: &ScenarioConfig, releases: &AtomicU32) -> RunReport {
		let report = scenario::run(fake, config).await;
		releases.fetch_add(1, Ordering::Relaxed);
		report
	}

	let releases = AtomicU32::new(0);
	let passing = FakeSurface::new(FakeConfig::default());
	let report = run_and_release(&passing, &fast_config(), &releases).await;
	assert!(report.passed());
	assert_eq!(releases.load(Ordering::Relaxed), 1);

	let releases = AtomicU32::new(0);
	let failing = FakeSurface::new(FakeConfig {
		never_settle: true,
		..Default::default()
	});
	let report = run_and_release(&failing, &fast_config(), &releases).await;
	assert!(!report.passed());
	assert_eq!(releases.load(Ordering::Relaxed), 1);
}
