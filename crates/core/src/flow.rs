//! The quiz-taking flow: one linear scenario driven against a [`UiSurface`].
//!
//! The flow is data-driven by the page. There is no declared maximum question
//! count; progression out of `Answering(n)` depends solely on which controls
//! the page currently shows.

use tracing::{debug, info};

use crate::error::{QuizError, Result};
use crate::selectors::SelectorContract;
use crate::surface::{ElementSnapshot, UiSurface};
use crate::wait::{self, WaitOptions, settled_text};

/// Text the question region shows before its content has loaded.
pub const LOADING_PLACEHOLDER: &str = "Loading question...";

/// Whole-run progression.
///
/// `ScoredWithoutSubmit` covers the page reaching its results view without the
/// flow ever activating a submit control. The application sometimes
/// auto-submits after the last question; the flow keeps that as a distinct
/// terminal state instead of treating it as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
	Init,
	Landed,
	Started,
	Answering(u32),
	Submitting,
	Scored,
	ScoredWithoutSubmit,
}

/// Outcome of one navigation-loop step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
	/// Next control activated; carries the settled text of the new question.
	Advanced(String),
	/// No next control, but a visible submit control.
	ReadyToSubmit,
	/// Neither control present. Terminal: the loop must not spin here.
	NoMoreActions,
}

/// Outcome of activating the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
	Submitted,
	/// Submit control absent or inert. Reported, never fatal.
	AlreadySubmitted,
}

/// The four result fields read off the score view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSnapshot {
	/// Percent-formatted score text, e.g. `"60%"`.
	pub score: String,
	pub correct: u32,
	pub incorrect: u32,
	pub total: u32,
}

impl ResultSnapshot {
	/// Parses the raw field texts and checks the count invariant.
	pub fn parse(score: &str, correct: &str, incorrect: &str, total: &str) -> Result<Self> {
		let score = score.trim();
		if !score.contains('%') {
			return Err(QuizError::Assertion(format!("score {score:?} is not percent-formatted")));
		}

		let snapshot = Self {
			score: score.to_string(),
			correct: parse_count("correct count", correct)?,
			incorrect: parse_count("incorrect count", incorrect)?,
			total: parse_count("total questions", total)?,
		};
		snapshot.check_sum()?;
		Ok(snapshot)
	}

	/// The snapshot is only valid when every answer is accounted for.
	pub fn check_sum(&self) -> Result<()> {
		if self.correct + self.incorrect != self.total {
			return Err(QuizError::Assertion(format!(
				"answer counts do not add up: {} correct + {} incorrect != {} total",
				self.correct, self.incorrect, self.total
			)));
		}
		Ok(())
	}
}

fn parse_count(field: &'static str, value: &str) -> Result<u32> {
	value.trim().parse().map_err(|_| QuizError::Parse {
		field,
		value: value.to_string(),
	})
}

/// Drives one quiz run over a borrowed surface.
///
/// The session is passed explicitly; the flow holds no handle of its own and
/// never tears the surface down.
pub struct QuizFlow<'a, S: UiSurface + ?Sized> {
	surface: &'a S,
	selectors: SelectorContract,
	wait: WaitOptions,
	placeholder: String,
	cursor: u32,
	state: RunState,
}

impl<'a, S: UiSurface + ?Sized> QuizFlow<'a, S> {
	pub fn new(surface: &'a S) -> Self {
		Self {
			surface,
			selectors: SelectorContract::default(),
			wait: WaitOptions::default(),
			placeholder: LOADING_PLACEHOLDER.to_string(),
			cursor: 0,
			state: RunState::Init,
		}
	}

	pub fn with_selectors(mut self, selectors: SelectorContract) -> Self {
		self.selectors = selectors;
		self
	}

	pub fn with_wait(mut self, wait: WaitOptions) -> Self {
		self.wait = wait;
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	/// Questions traversed so far in this run.
	pub fn cursor(&self) -> u32 {
		self.cursor
	}

	pub fn state(&self) -> RunState {
		self.state
	}

	pub fn selectors(&self) -> &SelectorContract {
		&self.selectors
	}

	/// Loads the landing page and waits until its controls are all present.
	pub async fn open(&mut self, url: &str) -> Result<()> {
		info!(target = "quizdrive", url, "opening landing page");
		self.surface.navigate(url).await?;

		wait::until_ready("landing controls present", &self.wait, async || {
			for selector in self.selectors.landing_controls() {
				if self.surface.query(selector).await?.is_empty() {
					return Ok(None);
				}
			}
			Ok(Some(()))
		})
		.await?;

		self.state = RunState::Landed;
		Ok(())
	}

	/// Activates the start control and waits for the first question to settle.
	/// Returns the first question's text.
	pub async fn start(&mut self) -> Result<String> {
		let start = self.selectors.start.clone();
		let Some(control) = self.first(&start).await? else {
			return Err(QuizError::ElementNotFound { selector: start });
		};
		if !control.actionable() {
			return Err(QuizError::Assertion(format!("start control {start} is present but not actionable")));
		}

		self.surface.click(&start, 0).await?;
		self.state = RunState::Started;
		self.cursor = 1;

		let question = self.wait_for_question().await?;
		info!(target = "quizdrive", question = %question, "quiz started");
		self.state = RunState::Answering(self.cursor);
		Ok(question)
	}

	/// Picks and clicks one of the currently visible answer candidates.
	///
	/// Prefers the first candidate whose text contains `marker`; falls back to
	/// the first candidate in presentation order. Zero candidates is a hard
	/// failure. Returns the chosen candidate's text for logging; the effect is
	/// observed only through the page's own state changes.
	pub async fn select_answer(&mut self, marker: Option<&str>) -> Result<String> {
		let selector = self.selectors.answer_options.clone();
		let options = self.surface.query(&selector).await?;
		if options.is_empty() {
			return Err(QuizError::NoCandidates { selector });
		}

		let index = marker
			.and_then(|m| options.iter().position(|opt| opt.text.contains(m)))
			.unwrap_or(0);
		let chosen = options[index].text.clone();

		debug!(
			target = "quizdrive",
			question = self.cursor,
			candidates = options.len(),
			chosen = %chosen,
			"selecting answer"
		);
		self.surface.click(&selector, index).await?;
		self.state = RunState::Answering(self.cursor);
		Ok(chosen)
	}

	/// One step of the navigation loop.
	///
	/// Activates the next control when it is present, visible, and enabled;
	/// otherwise probes for a visible submit control; otherwise reports that no
	/// action remains. "Neither control present" is terminal by contract, which
	/// is what keeps the loop finite.
	pub async fn advance_or_finish(&mut self) -> Result<StepOutcome> {
		if let Some(next) = self.first(&self.selectors.next).await? {
			if next.actionable() {
				self.surface.click(&self.selectors.next, 0).await?;
				self.cursor += 1;
				let question = self.wait_for_question().await?;
				info!(target = "quizdrive", question_number = self.cursor, question = %question, "advanced");
				self.state = RunState::Answering(self.cursor);
				return Ok(StepOutcome::Advanced(question));
			}
		}

		if let Some(submit) = self.first(&self.selectors.submit).await? {
			if submit.visible {
				debug!(target = "quizdrive", "no next control, submit is visible");
				return Ok(StepOutcome::ReadyToSubmit);
			}
		}

		debug!(target = "quizdrive", "neither next nor submit present, treating as terminal");
		Ok(StepOutcome::NoMoreActions)
	}

	/// Answers every remaining question. Returns how many questions were
	/// traversed when the loop reached a terminal step.
	pub async fn answer_all(&mut self, marker: Option<&str>) -> Result<u32> {
		loop {
			let chosen = self.select_answer(marker).await?;
			info!(target = "quizdrive", question_number = self.cursor, answer = %chosen, "answered");
			match self.advance_or_finish().await? {
				StepOutcome::Advanced(_) => {}
				StepOutcome::ReadyToSubmit | StepOutcome::NoMoreActions => return Ok(self.cursor),
			}
		}
	}

	/// Activates the submit control, or reports that submission already
	/// happened (absent or inert control), which is non-fatal by contract.
	pub async fn submit(&mut self) -> Result<SubmitOutcome> {
		let submit = self.selectors.submit.clone();
		let Some(control) = self.first(&submit).await? else {
			info!(target = "quizdrive", "submit control absent, already submitted or unavailable");
			return Ok(SubmitOutcome::AlreadySubmitted);
		};
		if !control.actionable() {
			info!(target = "quizdrive", "submit control inert, already submitted or unavailable");
			return Ok(SubmitOutcome::AlreadySubmitted);
		}

		self.state = RunState::Submitting;
		self.surface.click(&submit, 0).await?;

		let score = self.selectors.score.clone();
		wait::until_ready("score region present", &self.wait, async || {
			Ok(self.first(&score).await?.map(|_| ()))
		})
		.await?;

		info!(target = "quizdrive", "quiz submitted");
		Ok(SubmitOutcome::Submitted)
	}

	/// Waits for all four result fields to be simultaneously populated, then
	/// parses and validates them.
	pub async fn read_results(&mut self) -> Result<ResultSnapshot> {
		let texts = wait::until_ready("result fields populated", &self.wait, async || {
			let mut texts = Vec::with_capacity(4);
			for (_, selector) in self.selectors.result_regions() {
				let Some(region) = self.first(selector).await? else {
					return Ok(None);
				};
				if region.text.trim().is_empty() {
					return Ok(None);
				}
				texts.push(region.text.trim().to_string());
			}
			Ok(Some(texts))
		})
		.await?;

		let snapshot = ResultSnapshot::parse(&texts[0], &texts[1], &texts[2], &texts[3])?;
		self.state = if self.state == RunState::Submitting {
			RunState::Scored
		} else {
			RunState::ScoredWithoutSubmit
		};
		info!(
			target = "quizdrive",
			score = %snapshot.score,
			correct = snapshot.correct,
			incorrect = snapshot.incorrect,
			total = snapshot.total,
			"results read"
		);
		Ok(snapshot)
	}

	async fn first(&self, selector: &str) -> Result<Option<ElementSnapshot>> {
		Ok(self.surface.query(selector).await?.into_iter().next())
	}

	async fn wait_for_question(&self) -> Result<String> {
		let condition = format!("question {} text settled", self.cursor.max(1));
		let selector = self.selectors.question_text.clone();
		wait::until_ready(&condition, &self.wait, async || {
			let Some(region) = self.first(&selector).await? else {
				return Ok(None);
			};
			if settled_text(&region.text, &self.placeholder) {
				Ok(Some(region.text.trim().to_string()))
			} else {
				Ok(None)
			}
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_accepts_matching_counts() {
		let snap = ResultSnapshot::parse("60%", "3", "2", "5").unwrap();
		assert_eq!(snap.score, "60%");
		assert_eq!(snap.correct, 3);
		assert_eq!(snap.incorrect, 2);
		assert_eq!(snap.total, 5);
	}

	#[test]
	fn snapshot_rejects_mismatched_counts() {
		let err = ResultSnapshot::parse("80%", "3", "1", "5").unwrap_err();
		assert!(matches!(err, QuizError::Assertion(_)), "got {err}");
		assert!(err.to_string().contains("3 correct + 1 incorrect != 5 total"));
	}

	#[test]
	fn snapshot_requires_percent_format() {
		let err = ResultSnapshot::parse("60", "3", "2", "5").unwrap_err();
		assert!(matches!(err, QuizError::Assertion(_)));
	}

	#[test]
	fn snapshot_rejects_non_numeric_counts() {
		let err = ResultSnapshot::parse("60%", "three", "2", "5").unwrap_err();
		match err {
			QuizError::Parse { field, value } => {
				assert_eq!(field, "correct count");
				assert_eq!(value, "three");
			}
			other => panic!("expected parse error, got {other}"),
		}
	}

	#[test]
	fn snapshot_trims_field_text() {
		let snap = ResultSnapshot::parse(" 100% ", " 5 ", "0", "5").unwrap();
		assert_eq!(snap.score, "100%");
		assert_eq!(snap.correct, 5);
	}
}
