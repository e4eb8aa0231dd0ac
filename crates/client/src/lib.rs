//! Client for the Sone web interface's ajax endpoints.
//!
//! Every endpoint is a GET request to `ajax/<name>.ajax` that answers with a
//! JSON object carrying `success` and, when that is false, an `error` code.
//! [`ActionClient`] hides the wire format behind typed operations returning an
//! [`Outcome`]:
//! * [`Outcome::Success`]: the call went through and the server accepted it
//! * [`Outcome::ServerError`]: the server answered `success: false`
//! * [`Outcome::TransportFailure`]: no usable answer (network, status, payload)
//!
//! The network itself sits behind the [`Transport`] trait. [`HttpTransport`]
//! (feature `http`, on by default) talks to a live node; `MockTransport`
//! (feature `test-support`) replays scripted answers.

#![warn(missing_docs)]

mod client;
mod endpoint;
mod error;
#[cfg(feature = "http")]
mod http;
#[cfg(any(test, feature = "test-support"))]
mod mock;
mod outcome;
mod payload;
mod transport;
mod translations;

pub use client::{ActionClient, FormPassword, LikeKind};
pub use endpoint::Endpoint;
pub use error::{Error, Result, TransportError};
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
#[cfg(any(test, feature = "test-support"))]
pub use mock::{MockReply, MockTransport, RecordedRequest};
pub use outcome::{ErrorCode, Outcome};
pub use payload::{
	Ack, CreatedReply, LikingSone, Likes, NotificationData, RemovedNotification, ReplyFragment,
	SoneState, SoneStatus, Status, Translation,
};
pub use transport::{Query, Transport};
pub use translations::Translations;
