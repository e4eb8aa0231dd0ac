//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::trace;
use url::Url;

use crate::{Query, Transport, TransportError};

/// Where and how to reach the web interface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
	/// Root of the Sone web interface, with a trailing slash.
	pub base_url: String,
	/// Per-request timeout in milliseconds.
	pub timeout_ms: u64,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			base_url: "http://127.0.0.1:8888/Sone/".to_owned(),
			timeout_ms: 30_000,
		}
	}
}

/// Sends requests to a live web interface.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	base: Url,
	timeout: Duration,
}

impl HttpTransport {
	/// Creates a transport from `config`.
	pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
		let base = Url::parse(&config.base_url)
			.map_err(|e| TransportError::Request(format!("invalid base url {:?}: {e}", config.base_url)))?;
		let client = reqwest::Client::builder()
			.build()
			.map_err(|e| TransportError::Request(e.to_string()))?;
		Ok(Self {
			client,
			base,
			timeout: Duration::from_millis(config.timeout_ms),
		})
	}

	fn url(&self, path: &str, query: &Query) -> Result<Url, TransportError> {
		let mut url = self
			.base
			.join(path)
			.map_err(|e| TransportError::Request(format!("invalid path {path:?}: {e}")))?;
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
		}
		Ok(url)
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn get(&self, path: &str, query: &Query) -> Result<String, TransportError> {
		let url = self.url(path, query)?;
		trace!(%url, "GET");
		let response = self
			.client
			.get(url)
			.timeout(self.timeout)
			.send()
			.await
			.map_err(classify)?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status(status.as_u16()));
		}
		response.text().await.map_err(classify)
	}
}

fn classify(err: reqwest::Error) -> TransportError {
	if err.is_timeout() {
		TransportError::Timeout
	} else {
		TransportError::Request(err.to_string())
	}
}
