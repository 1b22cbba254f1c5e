use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}

// 0 = errors only (step banners carry the story)
// 1 (-v) = quizdrive info, browser plumbing quiet
// 2+ (-vv) = debug for everything
fn filter_for(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "error",
		1 => "info,chromiumoxide=warn",
		_ => "debug",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filters_parse_at_every_verbosity() {
		for verbosity in 0..=3 {
			let filter = filter_for(verbosity);
			assert!(EnvFilter::try_new(filter).is_ok(), "bad filter: {filter}");
		}
	}

	#[test]
	fn verbose_quiets_browser_plumbing() {
		assert_eq!(filter_for(1), "info,chromiumoxide=warn");
	}
}
