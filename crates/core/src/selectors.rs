//! Stable identifiers exposed by the quiz application.
//!
//! The whole run's correctness rests on these staying stable. They are held in
//! one overridable struct so the contract is explicit rather than scattered
//! through the flow as string literals.

/// CSS selectors for every page region the flow touches.
#[derive(Debug, Clone)]
pub struct SelectorContract {
	pub category: String,
	pub difficulty: String,
	pub start: String,
	pub question_text: String,
	pub answer_options: String,
	pub next: String,
	pub submit: String,
	pub score: String,
	pub correct_count: String,
	pub incorrect_count: String,
	pub total_questions: String,
}

impl Default for SelectorContract {
	fn default() -> Self {
		Self {
			category: "#category".into(),
			difficulty: "#difficulty".into(),
			start: "#startQuizBtn".into(),
			question_text: "#questionText".into(),
			answer_options: ".option-item".into(),
			next: "#nextBtn".into(),
			submit: "#submitBtn".into(),
			score: "#scoreValue".into(),
			correct_count: "#correctCount".into(),
			incorrect_count: "#incorrectCount".into(),
			total_questions: "#totalQuestions".into(),
		}
	}
}

impl SelectorContract {
	/// The controls that must all be present for the landing page to count as
	/// rendered.
	pub fn landing_controls(&self) -> [&str; 3] {
		[&self.category, &self.difficulty, &self.start]
	}

	/// The four result regions, paired with the field name used in errors.
	pub fn result_regions(&self) -> [(&'static str, &str); 4] {
		[
			("score", &self.score),
			("correct count", &self.correct_count),
			("incorrect count", &self.incorrect_count),
			("total questions", &self.total_questions),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_quiz_app_ids() {
		let contract = SelectorContract::default();
		assert_eq!(contract.start, "#startQuizBtn");
		assert_eq!(contract.answer_options, ".option-item");
		assert_eq!(contract.landing_controls(), ["#category", "#difficulty", "#startQuizBtn"]);
		assert_eq!(contract.result_regions()[0], ("score", "#scoreValue"));
	}
}
