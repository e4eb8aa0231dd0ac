//! Typed ajax calls with the uniform [`Outcome`] contract.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
	Ack, CreatedReply, Endpoint, Error, ErrorCode, Likes, Outcome, ReplyFragment, Result, Status,
	Translation, Transport,
};

/// Per-session secret the server requires on every state-changing call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormPassword(String);

impl FormPassword {
	/// Wraps the secret.
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	/// Returns the secret.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for FormPassword {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("FormPassword(..)")
	}
}

/// Which kind of entity a like refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeKind {
	/// A post.
	Post,
	/// A reply.
	Reply,
}

impl LikeKind {
	/// Returns the value of the `type` parameter, which is also the name of
	/// the id parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Post => "post",
			Self::Reply => "reply",
		}
	}

	fn query(self, id: &str) -> Vec<(&'static str, String)> {
		vec![("type", self.as_str().to_owned()), (self.as_str(), id.to_owned())]
	}
}

/// Issues ajax calls over a shared [`Transport`].
#[derive(Clone)]
pub struct ActionClient {
	transport: Arc<dyn Transport>,
	form_password: FormPassword,
}

impl fmt::Debug for ActionClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionClient")
			.field("form_password", &self.form_password)
			.finish_non_exhaustive()
	}
}

impl ActionClient {
	/// Creates a client sending through `transport`.
	pub fn new(transport: Arc<dyn Transport>, form_password: FormPassword) -> Self {
		Self {
			transport,
			form_password,
		}
	}

	/// Returns the form password attached to mutating calls.
	pub fn form_password(&self) -> &FormPassword {
		&self.form_password
	}

	/// Calls `endpoint` and classifies the answer.
	///
	/// Mutating endpoints get the form password appended. Transport errors
	/// and undecodable bodies are logged and reported as
	/// [`Outcome::TransportFailure`].
	pub async fn call<T: DeserializeOwned>(
		&self,
		endpoint: Endpoint,
		mut query: Vec<(&'static str, String)>,
	) -> Outcome<T> {
		if endpoint.is_mutating() {
			query.push(("formPassword", self.form_password.0.clone()));
		}
		match self.request(endpoint, &query).await {
			Ok(Outcome::ServerError(code)) => {
				debug!(%endpoint, %code, "call refused");
				Outcome::ServerError(code)
			}
			Ok(outcome) => outcome,
			Err(err) => {
				warn!(%endpoint, %err, "call failed");
				Outcome::TransportFailure
			}
		}
	}

	async fn request<T: DeserializeOwned>(
		&self,
		endpoint: Endpoint,
		query: &[(&'static str, String)],
	) -> Result<Outcome<T>> {
		debug!(%endpoint, params = query.len(), "calling");
		let body = self.transport.get(&endpoint.path(), query).await?;
		decode(&body)
	}

	/// Resolves a translation key.
	pub async fn get_translation(&self, key: &str) -> Outcome<String> {
		self.call::<Translation>(Endpoint::GetTranslation, vec![("key", key.to_owned())])
			.await
			.map(|t| t.value)
	}

	/// Deletes a post.
	pub async fn delete_post(&self, post: &str) -> Outcome<Ack> {
		self.call(Endpoint::DeletePost, vec![("post", post.to_owned())]).await
	}

	/// Deletes a reply.
	pub async fn delete_reply(&self, reply: &str) -> Outcome<Ack> {
		self.call(Endpoint::DeleteReply, vec![("reply", reply.to_owned())]).await
	}

	/// Likes a post or reply.
	pub async fn like(&self, kind: LikeKind, id: &str) -> Outcome<Ack> {
		self.call(Endpoint::Like, kind.query(id)).await
	}

	/// Withdraws a like.
	pub async fn unlike(&self, kind: LikeKind, id: &str) -> Outcome<Ack> {
		self.call(Endpoint::Unlike, kind.query(id)).await
	}

	/// Counts the likes of a post or reply.
	pub async fn get_likes(&self, kind: LikeKind, id: &str) -> Outcome<Likes> {
		self.call(Endpoint::GetLikes, kind.query(id)).await
	}

	/// Replies to `post`, returning the new reply's id.
	pub async fn create_reply(&self, post: &str, text: &str) -> Outcome<String> {
		self.call::<CreatedReply>(
			Endpoint::CreateReply,
			vec![("post", post.to_owned()), ("text", text.to_owned())],
		)
		.await
		.map(|created| created.reply)
	}

	/// Fetches the rendered reply.
	pub async fn get_reply(&self, reply: &str) -> Outcome<ReplyFragment> {
		self.call(Endpoint::GetReply, vec![("reply", reply.to_owned())]).await
	}

	/// Dismisses a notification.
	pub async fn dismiss_notification(&self, notification: &str) -> Outcome<Ack> {
		self.call(
			Endpoint::DismissNotification,
			vec![("notification", notification.to_owned())],
		)
		.await
	}

	/// Fetches Sone states and notification changes.
	pub async fn get_status(&self) -> Outcome<Status> {
		self.call(Endpoint::GetStatus, Vec::new()).await
	}

	/// Follows a Sone.
	pub async fn follow_sone(&self, sone: &str) -> Outcome<Ack> {
		self.call(Endpoint::FollowSone, vec![("sone", sone.to_owned())]).await
	}

	/// Stops following a Sone.
	pub async fn unfollow_sone(&self, sone: &str) -> Outcome<Ack> {
		self.call(Endpoint::UnfollowSone, vec![("sone", sone.to_owned())]).await
	}

	/// Locks a local Sone.
	pub async fn lock_sone(&self, sone: &str) -> Outcome<Ack> {
		self.call(Endpoint::LockSone, vec![("sone", sone.to_owned())]).await
	}

	/// Unlocks a local Sone.
	pub async fn unlock_sone(&self, sone: &str) -> Outcome<Ack> {
		self.call(Endpoint::UnlockSone, vec![("sone", sone.to_owned())]).await
	}
}

/// Decodes the `success`/`error` envelope and, on success, the payload.
///
/// A missing `success` field counts as `false`; a missing `error` field as
/// [`ErrorCode::UNKNOWN`].
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<Outcome<T>> {
	let Value::Object(map) = serde_json::from_str::<Value>(body)? else {
		return Err(Error::MissingPayload);
	};
	if !map.get("success").and_then(Value::as_bool).unwrap_or(false) {
		let code = map.get("error").and_then(Value::as_str).unwrap_or(ErrorCode::UNKNOWN);
		return Ok(Outcome::ServerError(ErrorCode::parse(code)));
	}
	Ok(Outcome::Success(serde_json::from_value(Value::Object(map))?))
}
