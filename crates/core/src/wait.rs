//! Cooperative polling against an asynchronously-rendered page.
//!
//! The page renders its skeleton before its content: an element can exist while
//! its text is still a loading placeholder. Every wait in the quiz flow goes
//! through [`until_ready`], which polls a probe with exponential backoff until
//! it settles or a bounded timeout elapses.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::error::{QuizError, Result};

/// Polling bounds for one wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
	/// Hard bound on how long a probe may stay unsettled.
	pub timeout: Duration,
	/// First back-off interval between polls.
	pub initial_interval: Duration,
	/// Back-off cap; intervals double up to this.
	pub max_interval: Duration,
}

impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
			initial_interval: Duration::from_millis(100),
			max_interval: Duration::from_secs(1),
		}
	}
}

impl WaitOptions {
	pub fn with_timeout_ms(ms: u64) -> Self {
		Self {
			timeout: Duration::from_millis(ms),
			..Self::default()
		}
	}
}

/// Polls `probe` until it yields a value or the timeout elapses.
///
/// `Ok(Some(value))` settles the wait; `Ok(None)` schedules another poll after
/// the current back-off interval; `Err` aborts immediately. A final poll is
/// always made at the deadline, so the wait never blocks past
/// `opts.timeout` plus one polling interval.
///
/// On timeout the error names `condition`, so the failure identifies which
/// predicate did not settle.
pub async fn until_ready<T, F>(condition: &str, opts: &WaitOptions, mut probe: F) -> Result<T>
where
	F: AsyncFnMut() -> Result<Option<T>>,
{
	let started = Instant::now();
	let deadline = started + opts.timeout;
	let mut interval = opts.initial_interval;
	let mut polls = 0u32;

	loop {
		polls += 1;
		if let Some(value) = probe().await? {
			debug!(
				target = "quizdrive",
				condition,
				polls,
				elapsed_ms = started.elapsed().as_millis() as u64,
				"condition settled"
			);
			return Ok(value);
		}

		let now = Instant::now();
		if now >= deadline {
			return Err(QuizError::Timeout {
				ms: opts.timeout.as_millis() as u64,
				condition: condition.to_string(),
			});
		}

		let nap = interval.min(deadline - now);
		trace!(target = "quizdrive", condition, nap_ms = nap.as_millis() as u64, "not ready, backing off");
		sleep(nap).await;
		interval = (interval * 2).min(opts.max_interval);
	}
}

/// True once `text` holds real content: non-empty after trimming and no longer
/// equal to the loading placeholder.
pub fn settled_text(text: &str, placeholder: &str) -> bool {
	let text = text.trim();
	!text.is_empty() && text != placeholder
}
