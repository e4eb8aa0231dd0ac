use async_trait::async_trait;

use crate::TransportError;

/// Query parameters of one request, in order.
pub type Query = [(&'static str, String)];

/// Sends GET requests and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Requests `path` (relative to the web interface root) with `query`.
	async fn get(&self, path: &str, query: &Query) -> Result<String, TransportError>;
}
