use std::fmt;

/// Classified result of one ajax call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
	/// The server accepted the call.
	Success(T),
	/// The server answered `success: false`.
	ServerError(ErrorCode),
	/// No usable answer arrived.
	TransportFailure,
}

impl<T> Outcome<T> {
	/// Maps the success payload.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
		match self {
			Self::Success(value) => Outcome::Success(f(value)),
			Self::ServerError(code) => Outcome::ServerError(code),
			Self::TransportFailure => Outcome::TransportFailure,
		}
	}

	/// Returns the success payload, if any.
	pub fn into_success(self) -> Option<T> {
		match self {
			Self::Success(value) => Some(value),
			_ => None,
		}
	}
}

/// Reason the server gave for refusing a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	/// `invalid-post-id`
	InvalidPostId,
	/// `invalid-reply-id`
	InvalidReplyId,
	/// `invalid-sone-id`
	InvalidSoneId,
	/// `invalid-notification-id`
	InvalidNotificationId,
	/// `auth-required`
	AuthRequired,
	/// `not-authorized`
	NotAuthorized,
	/// Any other code, kept verbatim.
	Other(String),
}

impl ErrorCode {
	/// Code used when the server omits the `error` field.
	pub const UNKNOWN: &'static str = "unknown";

	/// Parses a wire code.
	pub fn parse(code: &str) -> Self {
		match code {
			"invalid-post-id" => Self::InvalidPostId,
			"invalid-reply-id" => Self::InvalidReplyId,
			"invalid-sone-id" => Self::InvalidSoneId,
			"invalid-notification-id" => Self::InvalidNotificationId,
			"auth-required" => Self::AuthRequired,
			"not-authorized" => Self::NotAuthorized,
			other => Self::Other(other.to_owned()),
		}
	}

	/// Returns the wire code.
	pub fn as_str(&self) -> &str {
		match self {
			Self::InvalidPostId => "invalid-post-id",
			Self::InvalidReplyId => "invalid-reply-id",
			Self::InvalidSoneId => "invalid-sone-id",
			Self::InvalidNotificationId => "invalid-notification-id",
			Self::AuthRequired => "auth-required",
			Self::NotAuthorized => "not-authorized",
			Self::Other(code) => code,
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
