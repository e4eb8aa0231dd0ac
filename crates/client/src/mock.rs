//! Scripted in-memory transport.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{Endpoint, Query, Transport, TransportError};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum MockReply {
	/// A JSON body.
	Json(Value),
	/// A body sent verbatim, for malformed payloads.
	Raw(String),
	/// A transport error.
	Fail(TransportError),
}

impl MockReply {
	/// A `success: true` answer carrying `fields`.
	pub fn success(fields: Value) -> Self {
		let mut body = match fields {
			Value::Object(map) => map,
			_ => serde_json::Map::new(),
		};
		body.insert("success".to_owned(), Value::Bool(true));
		Self::Json(Value::Object(body))
	}

	/// A bare `success: true` answer.
	pub fn ok() -> Self {
		Self::success(Value::Null)
	}

	/// A `success: false` answer with `code`.
	pub fn error(code: &str) -> Self {
		Self::Json(serde_json::json!({ "success": false, "error": code }))
	}
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
	/// Request path.
	pub path: String,
	/// Query parameters, in order.
	pub query: Vec<(String, String)>,
}

impl RecordedRequest {
	/// Returns the first value of parameter `name`.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}
}

#[derive(Default)]
struct MockState {
	queues: HashMap<String, VecDeque<MockReply>>,
	requests: Vec<RecordedRequest>,
}

/// Transport answering from per-endpoint queues and recording every request.
///
/// A request to an endpoint whose queue is empty fails with
/// [`TransportError::Request`].
#[derive(Default)]
pub struct MockTransport {
	state: Mutex<MockState>,
}

impl MockTransport {
	/// Creates a transport with nothing scripted.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues `reply` for the next request to `endpoint`.
	pub fn push(&self, endpoint: Endpoint, reply: MockReply) -> &Self {
		self.state.lock().queues.entry(endpoint.path()).or_default().push_back(reply);
		self
	}

	/// Queues a translation answer.
	pub fn translation(&self, value: &str) -> &Self {
		self.push(Endpoint::GetTranslation, MockReply::success(serde_json::json!({ "value": value })))
	}

	/// Returns every request received so far.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().requests.clone()
	}

	/// Returns the requests received for `endpoint`.
	pub fn requests_to(&self, endpoint: Endpoint) -> Vec<RecordedRequest> {
		let path = endpoint.path();
		self.state
			.lock()
			.requests
			.iter()
			.filter(|request| request.path == path)
			.cloned()
			.collect()
	}

	/// Returns the number of answers still queued for `endpoint`.
	pub fn pending(&self, endpoint: Endpoint) -> usize {
		self.state.lock().queues.get(&endpoint.path()).map_or(0, VecDeque::len)
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn get(&self, path: &str, query: &Query) -> Result<String, TransportError> {
		let mut state = self.state.lock();
		state.requests.push(RecordedRequest {
			path: path.to_owned(),
			query: query.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect(),
		});
		match state.queues.get_mut(path).and_then(VecDeque::pop_front) {
			Some(MockReply::Json(value)) => Ok(value.to_string()),
			Some(MockReply::Raw(body)) => Ok(body),
			Some(MockReply::Fail(err)) => Err(err),
			None => Err(TransportError::Request(format!("nothing scripted for {path}"))),
		}
	}
}
