use thiserror::Error;

/// A convenient type alias for `Result` with `E` = [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to get any answer out of the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
	/// The request could not be sent or the body could not be read.
	#[error("request failed: {0}")]
	Request(String),
	/// The server answered with a non-success HTTP status.
	#[error("server answered with status {0}")]
	Status(u16),
	/// The request did not complete in time.
	#[error("request timed out")]
	Timeout,
	/// The transport is shut down.
	#[error("transport closed")]
	Closed,
}

/// Errors while turning a request into a decoded answer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The transport produced no response body.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The body is not the expected JSON.
	#[error("malformed payload: {0}")]
	Decode(#[from] serde_json::Error),
	/// The body is JSON `null` or not an object.
	#[error("missing payload")]
	MissingPayload,
}
