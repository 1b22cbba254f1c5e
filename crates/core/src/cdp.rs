//! Chrome DevTools Protocol implementation of [`UiSurface`].
//!
//! Owns the whole browser lifecycle: launch, the event-handler task, and an
//! explicit [`CdpSurface::close`]. Element queries go through a single
//! JavaScript evaluation so presence, text, visibility, and enablement are
//! captured in one atomic snapshot of the page.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{QuizError, Result};
use crate::surface::{ElementSnapshot, UiSurface};

/// Launch options for the browser session.
#[derive(Debug, Clone)]
pub struct CdpConfig {
	pub headless: bool,
	/// Chrome executable override; auto-detected when `None`.
	pub chrome: Option<PathBuf>,
	/// Required inside most containers.
	pub no_sandbox: bool,
	pub window: (u32, u32),
}

impl Default for CdpConfig {
	fn default() -> Self {
		Self {
			headless: true,
			chrome: None,
			no_sandbox: false,
			window: (1280, 900),
		}
	}
}

/// One exclusive browser session over CDP.
pub struct CdpSurface {
	browser: Browser,
	page: Page,
	handler: JoinHandle<()>,
}

impl CdpSurface {
	/// Launches a browser and opens the single page this session drives.
	pub async fn launch(config: CdpConfig) -> Result<Self> {
		let mut builder = BrowserConfig::builder().window_size(config.window.0, config.window.1);
		if !config.headless {
			builder = builder.with_head();
		}
		if config.no_sandbox {
			builder = builder.no_sandbox();
		}
		if let Some(path) = &config.chrome {
			builder = builder.chrome_executable(path);
		}
		let browser_config = builder.build().map_err(QuizError::BrowserLaunch)?;

		let (browser, mut events) = Browser::launch(browser_config)
			.await
			.map_err(|e| QuizError::BrowserLaunch(e.to_string()))?;

		// The handler stream must be drained for the whole session lifetime.
		let handler = tokio::spawn(async move {
			while let Some(event) = events.next().await {
				if let Err(err) = event {
					warn!(target = "quizdrive", error = %err, "cdp handler error");
					break;
				}
			}
		});

		let page = match browser.new_page("about:blank").await {
			Ok(page) => page,
			Err(err) => {
				handler.abort();
				return Err(QuizError::BrowserLaunch(err.to_string()));
			}
		};

		debug!(target = "quizdrive", headless = config.headless, "browser session launched");
		Ok(Self { browser, page, handler })
	}

	/// Shuts the session down. Called on every exit path, exactly once.
	pub async fn close(mut self) -> Result<()> {
		let close = self.browser.close().await;
		let _ = self.browser.wait().await;
		self.handler.abort();
		close.map_err(|e| QuizError::BrowserLaunch(format!("browser shutdown failed: {e}")))?;
		debug!(target = "quizdrive", "browser session closed");
		Ok(())
	}

	async fn evaluate<T: serde::de::DeserializeOwned>(&self, expression: String) -> Result<T> {
		let outcome = self
			.page
			.evaluate(expression)
			.await
			.map_err(|e| QuizError::JsEval(e.to_string()))?;
		outcome.into_value().map_err(|e| QuizError::JsEval(e.to_string()))
	}
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
	text: String,
	visible: bool,
	enabled: bool,
}

/// Embeds a selector into JavaScript as a string literal.
fn js_string(selector: &str) -> String {
	serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string())
}

#[async_trait]
impl UiSurface for CdpSurface {
	async fn navigate(&self, url: &str) -> Result<()> {
		self.page.goto(url).await.map_err(|e| QuizError::Navigation {
			url: url.to_string(),
			source: anyhow::Error::new(e),
		})?;
		self.page.wait_for_navigation().await.map_err(|e| QuizError::Navigation {
			url: url.to_string(),
			source: anyhow::Error::new(e),
		})?;
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		let url = self.page.url().await.map_err(|e| QuizError::JsEval(e.to_string()))?;
		Ok(url.unwrap_or_default())
	}

	async fn title(&self) -> Result<String> {
		let title = self.page.get_title().await.map_err(|e| QuizError::JsEval(e.to_string()))?;
		Ok(title.unwrap_or_default())
	}

	async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
		let expression = format!(
			r#"Array.from(document.querySelectorAll({sel})).map(el => ({{
				text: (el.innerText || el.textContent || '').trim(),
				visible: !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length),
				enabled: !el.disabled
			}}))"#,
			sel = js_string(selector)
		);
		let raw: Vec<RawSnapshot> = self.evaluate(expression).await?;
		Ok(raw
			.into_iter()
			.map(|r| ElementSnapshot {
				text: r.text,
				visible: r.visible,
				enabled: r.enabled,
			})
			.collect())
	}

	async fn click(&self, selector: &str, index: usize) -> Result<()> {
		let expression = format!(
			r#"(() => {{
				const els = document.querySelectorAll({sel});
				if (els.length <= {index}) return false;
				els[{index}].click();
				return true;
			}})()"#,
			sel = js_string(selector)
		);
		let clicked: bool = self.evaluate(expression).await?;
		if !clicked {
			return Err(QuizError::ElementNotFound {
				selector: selector.to_string(),
			});
		}
		Ok(())
	}
}
