//! The remote UI control channel.
//!
//! Everything the quiz flow knows about the browser goes through [`UiSurface`].
//! The production implementation is [`crate::cdp::CdpSurface`]; tests script an
//! in-memory fake against the same trait.

use async_trait::async_trait;

use crate::error::Result;

/// Point-in-time view of one element matched by a selector query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
	/// Rendered text content, whitespace-trimmed.
	pub text: String,
	/// Whether the element takes up layout space.
	pub visible: bool,
	/// Whether the element accepts interaction (`disabled` not set).
	pub enabled: bool,
}

impl ElementSnapshot {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			visible: true,
			enabled: true,
		}
	}

	/// True when this element is both visible and enabled.
	pub fn actionable(&self) -> bool {
		self.visible && self.enabled
	}
}

/// One browser session, owned exclusively by a single run.
///
/// `query` returning an empty vector is the explicit element-or-none probe:
/// absence is data here, never an error. Errors mean the channel itself broke.
#[async_trait]
pub trait UiSurface: Send + Sync {
	/// Loads a resource in the active page.
	async fn navigate(&self, url: &str) -> Result<()>;

	/// Current address-bar URL.
	async fn current_url(&self) -> Result<String>;

	/// Current document title.
	async fn title(&self) -> Result<String>;

	/// Snapshots every element matching a CSS selector, in presentation order.
	async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>>;

	/// Clicks the nth element matching a selector. Fails with
	/// [`crate::QuizError::ElementNotFound`] if the match vanished since the
	/// last query.
	async fn click(&self, selector: &str, index: usize) -> Result<()>;
}
