//! Adaptive status polling.
//!
//! The poller sleeps, polls once, and picks the next delay from the outcome
//! alone: healthy answers keep the short interval, refusals back off to the
//! degraded interval, and unusable answers to the offline one. Exactly one
//! poll is in flight at any time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sone_client::ErrorCode;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::notifications::Reconciliation;
use crate::page::Page;

/// Connection health derived from the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollHealth {
	/// The server answered and the status was applied.
	Healthy,
	/// The server answered `success: false`.
	Degraded,
	/// No usable answer.
	Offline,
}

/// Result of one status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
	/// The status was applied to the page.
	Applied(Reconciliation),
	/// The server refused the poll.
	LogicalFailure(ErrorCode),
	/// The poll produced no usable answer.
	TransportFailure,
}

impl PollResult {
	/// Returns the health this result indicates.
	pub const fn health(&self) -> PollHealth {
		match self {
			Self::Applied(_) => PollHealth::Healthy,
			Self::LogicalFailure(_) => PollHealth::Degraded,
			Self::TransportFailure => PollHealth::Offline,
		}
	}
}

/// Returns the delay before the poll following `result`.
pub fn next_interval(config: &PollConfig, result: &PollResult) -> Duration {
	let millis = match result.health() {
		PollHealth::Healthy => config.healthy_interval,
		PollHealth::Degraded => config.degraded_interval,
		PollHealth::Offline => config.offline_interval,
	};
	Duration::from_millis(millis)
}

/// Source of the delays between polls.
#[async_trait]
pub trait Delay: Send + Sync {
	/// Completes after `duration`.
	async fn sleep(&self, duration: Duration);
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
	async fn sleep(&self, duration: Duration) {
		tokio::time::sleep(duration).await;
	}
}

/// Periodic status poll of one page.
pub struct StatusPoller {
	page: Page,
	delay: Arc<dyn Delay>,
	interval: Duration,
}

impl StatusPoller {
	/// Creates a poller for `page` using the tokio timer.
	pub fn new(page: Page) -> Self {
		Self::with_delay(page, Arc::new(TokioDelay))
	}

	/// Creates a poller with an explicit delay source.
	pub fn with_delay(page: Page, delay: Arc<dyn Delay>) -> Self {
		let interval = page.config().poll.initial_delay();
		Self { page, delay, interval }
	}

	/// Delay before the next poll.
	pub const fn interval(&self) -> Duration {
		self.interval
	}

	/// Polls once and adopts the interval the result calls for.
	pub async fn poll_once(&mut self) -> PollResult {
		let result = self.page.poll_status().await;
		let next = next_interval(&self.page.config().poll, &result);
		match &result {
			PollResult::Applied(_) => {}
			PollResult::LogicalFailure(code) => debug!(%code, "status poll refused"),
			PollResult::TransportFailure => debug!("status poll failed"),
		}
		if next > self.interval {
			warn!(health = ?result.health(), interval_ms = next.as_millis(), "backing off status polls");
		} else if next < self.interval {
			info!(interval_ms = next.as_millis(), "status polls recovered");
		}
		self.interval = next;
		result
	}

	/// Polls forever. The first poll runs after the initial delay.
	pub async fn run(mut self) {
		info!(initial_ms = self.interval.as_millis(), "status poller started");
		loop {
			self.delay.sleep(self.interval).await;
			self.poll_once().await;
		}
	}

	/// Runs the poller on the current tokio runtime.
	pub fn spawn(self) -> JoinHandle<()> {
		tokio::spawn(self.run())
	}
}

impl std::fmt::Debug for StatusPoller {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StatusPoller").field("interval", &self.interval).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;
