//! quizdrive: end-to-end scenario runner for the quiz web application.
//!
//! Drives a real browser through the whole quiz-taking flow (landing page →
//! start → answer questions → submit → score) and asserts UI state at each
//! stage. The interesting machinery is the wait discipline in [`wait`]: the
//! page renders asynchronously, so every stage polls a readiness predicate
//! with a bounded timeout before asserting anything.
//!
//! # Example
//!
//! ```ignore
//! use quizdrive::{CdpConfig, CdpSurface, ScenarioConfig, scenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let surface = CdpSurface::launch(CdpConfig::default()).await?;
//!     let report = scenario::run(&surface, &ScenarioConfig::default()).await;
//!     surface.close().await?;
//!
//!     for step in &report.steps {
//!         println!("{}: {}", step.name, step.detail);
//!     }
//!     assert!(report.passed());
//!     Ok(())
//! }
//! ```

pub mod cdp;
pub mod error;
pub mod flow;
pub mod scenario;
pub mod selectors;
pub mod surface;
pub mod wait;

pub use cdp::{CdpConfig, CdpSurface};
pub use error::{QuizError, Result};
pub use flow::{LOADING_PLACEHOLDER, QuizFlow, ResultSnapshot, RunState, StepOutcome, SubmitOutcome};
pub use scenario::{RunReport, ScenarioConfig, StepReport};
pub use selectors::SelectorContract;
pub use surface::{ElementSnapshot, UiSurface};
pub use wait::{WaitOptions, settled_text, until_ready};
