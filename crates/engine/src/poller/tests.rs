use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sone_client::{Endpoint, MockReply};

use super::*;
use crate::test_support::Fixture;

/// Delay that records every requested duration before sleeping on the
/// (paused) tokio clock.
#[derive(Default)]
struct RecordingDelay {
	slept: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Delay for RecordingDelay {
	async fn sleep(&self, duration: Duration) {
		self.slept.lock().push(duration);
		tokio::time::sleep(duration).await;
	}
}

#[derive(Debug, Clone, Copy)]
enum Answer {
	Applied,
	Refused,
	Broken,
}

impl Answer {
	fn reply(self) -> MockReply {
		match self {
			Self::Applied => MockReply::success(json!({})),
			Self::Refused => MockReply::error("auth-required"),
			Self::Broken => MockReply::Raw("null".to_owned()),
		}
	}

	fn interval(self) -> Duration {
		match self {
			Self::Applied => Duration::from_secs(5),
			Self::Refused => Duration::from_secs(30),
			Self::Broken => Duration::from_secs(60),
		}
	}
}

#[test]
fn intervals_follow_configuration() {
	let config = PollConfig {
		healthy_interval: 1_000,
		degraded_interval: 2_000,
		offline_interval: 3_000,
		..PollConfig::default()
	};

	assert_eq!(
		next_interval(&config, &PollResult::Applied(Reconciliation::default())),
		Duration::from_secs(1)
	);
	assert_eq!(
		next_interval(&config, &PollResult::LogicalFailure(ErrorCode::AuthRequired)),
		Duration::from_secs(2)
	);
	assert_eq!(next_interval(&config, &PollResult::TransportFailure), Duration::from_secs(3));
}

#[test]
fn health_follows_result() {
	assert_eq!(PollResult::Applied(Reconciliation::default()).health(), PollHealth::Healthy);
	assert_eq!(
		PollResult::LogicalFailure(ErrorCode::Other("x".to_owned())).health(),
		PollHealth::Degraded
	);
	assert_eq!(PollResult::TransportFailure.health(), PollHealth::Offline);
}

#[rstest]
#[tokio::test]
async fn next_interval_ignores_prior_interval(
	#[values(Answer::Applied, Answer::Refused, Answer::Broken)] prior: Answer,
	#[values(Answer::Applied, Answer::Refused, Answer::Broken)] current: Answer,
) {
	let f = Fixture::new("");
	f.script(Endpoint::GetStatus, prior.reply())
		.script(Endpoint::GetStatus, current.reply());
	let mut poller = StatusPoller::new(f.page.clone());
	assert_eq!(poller.interval(), Duration::from_secs(5));

	poller.poll_once().await;
	assert_eq!(poller.interval(), prior.interval());
	poller.poll_once().await;

	assert_eq!(poller.interval(), current.interval());
}

#[tokio::test(start_paused = true)]
async fn run_polls_once_per_interval() {
	let f = Fixture::new("");
	f.script(Endpoint::GetStatus, Answer::Applied.reply())
		.script(Endpoint::GetStatus, Answer::Refused.reply())
		.script(Endpoint::GetStatus, Answer::Broken.reply());
	let delay = Arc::new(RecordingDelay::default());
	let poller = StatusPoller::with_delay(f.page.clone(), delay.clone());

	let finished = tokio::time::timeout(Duration::from_secs(130), poller.run()).await;

	assert!(finished.is_err(), "the poller never stops");
	let secs: Vec<_> = delay.slept.lock().iter().map(Duration::as_secs).collect();
	assert_eq!(secs, [5, 5, 30, 60, 60]);
	assert_eq!(f.sent(Endpoint::GetStatus).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn spawned_poller_waits_for_initial_delay() {
	let f = Fixture::new("");
	f.script(Endpoint::GetStatus, Answer::Applied.reply());
	let handle = StatusPoller::new(f.page.clone()).spawn();

	tokio::time::sleep(Duration::from_secs(4)).await;
	assert!(f.sent(Endpoint::GetStatus).is_empty());
	tokio::time::sleep(Duration::from_secs(2)).await;
	assert_eq!(f.sent(Endpoint::GetStatus).len(), 1);

	handle.abort();
}
