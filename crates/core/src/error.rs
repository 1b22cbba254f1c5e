use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
	#[error("browser launch failed: {0}")]
	BrowserLaunch(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	#[error("javascript evaluation failed: {0}")]
	JsEval(String),

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error("no answer candidates matched: {selector}")]
	NoCandidates { selector: String },

	#[error("assertion failed: {0}")]
	Assertion(String),

	#[error("could not parse {field} from {value:?}")]
	Parse { field: &'static str, value: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl QuizError {
	/// True for failures that invalidate page state itself, as opposed to
	/// infrastructure problems reaching the page.
	pub fn is_assertion(&self) -> bool {
		matches!(self, QuizError::Assertion(_) | QuizError::Parse { .. } | QuizError::NoCandidates { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn timeout_message_names_condition() {
		let err = QuizError::Timeout {
			ms: 30_000,
			condition: "question text settled".into(),
		};
		assert_eq!(err.to_string(), "timeout after 30000ms waiting for: question text settled");
	}

	#[test]
	fn assertion_classification() {
		assert!(QuizError::Assertion("counts".into()).is_assertion());
		assert!(
			!QuizError::Timeout {
				ms: 1,
				condition: "x".into()
			}
			.is_assertion()
		);
	}
}
