//! Like, follow and lock toggles.
//!
//! All toggles are pessimistic: the page only changes once the server
//! confirmed the call. Refusals are alerted, transport failures only logged.

use sone_client::{Ack, LikeKind, Likes, Outcome};
use sone_dom::{Document, HIDDEN_CLASS, NodeId};
use tracing::debug;

use crate::binding::Binding;
use crate::event::Flow;
use crate::locator::{POST_CLASS, REPLY_CLASS, locate_post, locate_reply, locate_sone};
use crate::page::{Page, PageState};

/// Follow and lock controls of a Sone widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoneAction {
	/// Start following.
	Follow,
	/// Stop following.
	Unfollow,
	/// Lock against insertion.
	Lock,
	/// Unlock.
	Unlock,
}

impl SoneAction {
	/// Every action.
	pub const ALL: [Self; 4] = [Self::Follow, Self::Unfollow, Self::Lock, Self::Unlock];

	/// Class of the form triggering the action.
	pub const fn class(self) -> &'static str {
		match self {
			Self::Follow => "follow",
			Self::Unfollow => "unfollow",
			Self::Lock => "lock",
			Self::Unlock => "unlock",
		}
	}

	/// The action undoing this one.
	pub const fn counterpart(self) -> Self {
		match self {
			Self::Follow => Self::Unfollow,
			Self::Unfollow => Self::Follow,
			Self::Lock => Self::Unlock,
			Self::Unlock => Self::Lock,
		}
	}
}

/// Class of the container element of `kind`.
pub(crate) const fn container_class(kind: LikeKind) -> &'static str {
	match kind {
		LikeKind::Post => POST_CLASS,
		LikeKind::Reply => REPLY_CLASS,
	}
}

/// Finds the attached post or reply element with `id`.
pub(crate) fn find_entity(doc: &Document, kind: LikeKind, id: &str) -> Option<NodeId> {
	doc.get_element_by_id(id)
		.filter(|&node| doc.has_class(node, container_class(kind)))
}

/// Returns the status line controls carrying `class` of a post or reply.
///
/// Post controls are limited to the post's own status line so the replies'
/// controls are left alone.
pub(crate) fn status_controls(doc: &Document, kind: LikeKind, id: &str, class: &str) -> Vec<NodeId> {
	let Some(entity) = find_entity(doc, kind, id) else {
		return Vec::new();
	};
	let selector = match kind {
		LikeKind::Post => format!("> .inner-part > .status-line .{class}"),
		LikeKind::Reply => format!(".status-line .{class}"),
	};
	doc.select(entity, &selector)
}

/// Writes a like count into the status line of a post or reply.
pub(crate) fn render_likes(doc: &mut Document, kind: LikeKind, id: &str, likes: &Likes) {
	let names = likes.names();
	for counter in status_controls(doc, kind, id, "likes") {
		doc.toggle_class(counter, HIDDEN_CLASS, likes.likes == 0);
		for count in doc.select(counter, "span.like-count") {
			doc.set_text(count, likes.likes.to_string());
		}
		for span in doc.select(counter, "> span") {
			doc.set_attr(span, "title", names.clone());
		}
	}
}

impl PageState {
	/// Wires like and unlike forms of every post and reply.
	pub(crate) fn bind_like_forms(&mut self) {
		let root = self.doc.root();
		let post_likes = self.doc.select(root, "#sone .post > .inner-part > .status-line .like");
		let post_unlikes = self.doc.select(root, "#sone .post > .inner-part > .status-line .unlike");
		self.bind_all(post_likes, &Binding::Like(LikeKind::Post));
		self.bind_all(post_unlikes, &Binding::Unlike(LikeKind::Post));
		self.bind_reply_like_forms(root);
	}

	/// Wires like and unlike forms of the replies below `scope`.
	pub(crate) fn bind_reply_like_forms(&mut self, scope: NodeId) {
		let selector = |class: &str| {
			if self.doc.has_class(scope, REPLY_CLASS) {
				format!(".status-line .{class}")
			} else {
				format!(".reply .status-line .{class}")
			}
		};
		let likes = self.doc.select(scope, &selector("like"));
		let unlikes = self.doc.select(scope, &selector("unlike"));
		self.bind_all(likes, &Binding::Like(LikeKind::Reply));
		self.bind_all(unlikes, &Binding::Unlike(LikeKind::Reply));
	}

	/// Wires follow, unfollow, lock and unlock forms.
	pub(crate) fn bind_sone_toggles(&mut self) {
		let root = self.doc.root();
		for action in SoneAction::ALL {
			let forms = self.doc.select(root, &format!("#sone .{}", action.class()));
			self.bind_all(forms, &Binding::SoneToggle(action));
		}
	}
}

impl Page {
	/// Likes (or unlikes) the post or reply owning `form`, then refreshes the
	/// displayed count.
	pub(crate) async fn toggle_like(&self, form: NodeId, kind: LikeKind, like: bool) -> Flow {
		let id = self.with_document(|doc| match kind {
			LikeKind::Post => locate_post(&doc.node(form)),
			LikeKind::Reply => locate_reply(&doc.node(form)),
		});
		let Some(id) = id else {
			debug!(%form, kind = kind.as_str(), "like control outside of its container");
			return Flow::Stop;
		};

		let outcome = if like {
			self.client().like(kind, &id).await
		} else {
			self.client().unlike(kind, &id).await
		};
		match outcome {
			Outcome::Success(Ack {}) => {
				let (hide, show) = if like { ("like", "unlike") } else { ("unlike", "like") };
				self.with_document_mut(|doc| {
					for node in status_controls(doc, kind, &id, hide) {
						doc.add_class(node, HIDDEN_CLASS);
					}
					for node in status_controls(doc, kind, &id, show) {
						doc.remove_class(node, HIDDEN_CLASS);
					}
				});
				self.refresh_likes(kind, &id).await;
			}
			Outcome::ServerError(code) => self.alert(code.as_str()),
			Outcome::TransportFailure => debug!(id, like, "like not confirmed"),
		}
		Flow::Stop
	}

	/// Fetches and renders the like count of a post or reply.
	pub(crate) async fn refresh_likes(&self, kind: LikeKind, id: &str) {
		match self.client().get_likes(kind, id).await {
			Outcome::Success(likes) => self.with_document_mut(|doc| render_likes(doc, kind, id, &likes)),
			outcome => debug!(id, ?outcome, "keeping stale like count"),
		}
	}

	/// Runs a follow or lock toggle for the Sone owning `form`.
	pub(crate) async fn toggle_sone(&self, form: NodeId, action: SoneAction) -> Flow {
		let Some(sone) = self.with_document(|doc| locate_sone(&doc.node(form))) else {
			debug!(%form, action = action.class(), "toggle outside of a Sone widget");
			return Flow::Stop;
		};

		let client = self.client();
		let outcome = match action {
			SoneAction::Follow => client.follow_sone(&sone).await,
			SoneAction::Unfollow => client.unfollow_sone(&sone).await,
			SoneAction::Lock => client.lock_sone(&sone).await,
			SoneAction::Unlock => client.unlock_sone(&sone).await,
		};
		match outcome {
			Outcome::Success(Ack {}) => self.with_document_mut(|doc| {
				doc.add_class(form, HIDDEN_CLASS);
				let Some(parent) = doc.parent(form) else {
					return;
				};
				for other in doc.select(parent, &format!(".{}", action.counterpart().class())) {
					doc.remove_class(other, HIDDEN_CLASS);
				}
			}),
			Outcome::ServerError(code) => self.alert(code.as_str()),
			Outcome::TransportFailure => debug!(sone, action = action.class(), "toggle not confirmed"),
		}
		Flow::Stop
	}
}

#[cfg(test)]
mod tests;
