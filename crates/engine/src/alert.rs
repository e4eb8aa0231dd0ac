//! Blocking user-facing error messages.

use tracing::warn;

/// Shows a message the user has to acknowledge.
pub trait Alerter: Send + Sync {
	/// Presents `message`.
	fn alert(&self, message: &str);
}

/// Alerter that only logs, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerter;

impl Alerter for LogAlerter {
	fn alert(&self, message: &str) {
		warn!(message, "alert");
	}
}

/// Alerter that keeps every message.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingAlerter {
	messages: parking_lot::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingAlerter {
	/// Returns the messages shown so far.
	pub fn messages(&self) -> Vec<String> {
		self.messages.lock().clone()
	}
}

#[cfg(any(test, feature = "test-support"))]
impl Alerter for RecordingAlerter {
	fn alert(&self, message: &str) {
		self.messages.lock().push(message.to_owned());
	}
}
