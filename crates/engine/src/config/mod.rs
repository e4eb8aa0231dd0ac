//! Engine configuration.
//!
//! Every field has a default matching the stock web interface, so an empty
//! document (or no file at all) yields a working configuration:
//!
//! ```toml
//! form-password = "..."          # otherwise read from the page
//!
//! [poll]
//! initial-delay = 5000           # milliseconds
//! healthy-interval = 5000
//! degraded-interval = 30000
//! offline-interval = 60000
//!
//! [replies]
//! visible-replies = 2
//!
//! [translations]
//! reply-placeholder = "WebInterface.DefaultText.Reply"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// File that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The document is not valid TOML for this schema.
	#[error("failed to parse engine config: {0}")]
	Parse(#[from] toml::de::Error),

	/// A value is out of range.
	#[error("invalid engine config: {0}")]
	Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
	/// Status polling cadence.
	pub poll: PollConfig,
	/// Reply list presentation.
	pub replies: ReplyConfig,
	/// Translation keys resolved during bootstrap.
	pub translations: TranslationKeys,
	/// Form password to use instead of the one embedded in the page.
	pub form_password: Option<String>,
}

impl EngineConfig {
	/// Parses and validates a TOML document.
	pub fn parse(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates the TOML file at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&source)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<()> {
		let intervals = [
			("initial-delay", self.poll.initial_delay),
			("healthy-interval", self.poll.healthy_interval),
			("degraded-interval", self.poll.degraded_interval),
			("offline-interval", self.poll.offline_interval),
		];
		if let Some((name, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
			return Err(ConfigError::Invalid(format!("poll.{name} must be positive")));
		}
		Ok(())
	}
}

/// Status polling cadence, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PollConfig {
	/// Delay before the first poll.
	pub initial_delay: u64,
	/// Delay after a successful poll.
	pub healthy_interval: u64,
	/// Delay after the server answered `success: false`.
	pub degraded_interval: u64,
	/// Delay after a transport failure.
	pub offline_interval: u64,
}

impl Default for PollConfig {
	fn default() -> Self {
		Self {
			initial_delay: 5_000,
			healthy_interval: 5_000,
			degraded_interval: 30_000,
			offline_interval: 60_000,
		}
	}
}

impl PollConfig {
	/// Delay before the first poll.
	pub fn initial_delay(&self) -> Duration {
		Duration::from_millis(self.initial_delay)
	}
}

/// Reply list presentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReplyConfig {
	/// Replies per post left visible by truncation.
	pub visible_replies: usize,
}

impl Default for ReplyConfig {
	fn default() -> Self {
		Self { visible_replies: 2 }
	}
}

/// Translation keys used by the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranslationKeys {
	/// Placeholder of the status update input.
	pub status_update_placeholder: String,
	/// Placeholder of reply inputs.
	pub reply_placeholder: String,
	/// Text of the confirm button for post deletion.
	pub delete_post_confirm: String,
	/// Text of the confirm button for reply deletion.
	pub delete_reply_confirm: String,
	/// Text of the control revealing truncated replies.
	pub click_to_show_replies: String,
}

impl Default for TranslationKeys {
	fn default() -> Self {
		Self {
			status_update_placeholder: "WebInterface.DefaultText.StatusUpdate".to_owned(),
			reply_placeholder: "WebInterface.DefaultText.Reply".to_owned(),
			delete_post_confirm: "WebInterface.Confirmation.DeletePostButton".to_owned(),
			delete_reply_confirm: "WebInterface.Confirmation.DeleteReplyButton".to_owned(),
			click_to_show_replies: "WebInterface.ClickToShow.Replies".to_owned(),
		}
	}
}
