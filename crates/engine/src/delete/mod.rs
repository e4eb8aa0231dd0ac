//! In-place delete confirmation.
//!
//! Enhancing a delete button inserts a hidden confirm button right after it.
//! The first click swaps the two and arms the outside-click guard; only a
//! click on the confirm button issues the delete call.

use std::borrow::Cow;

use sone_client::{Ack, ErrorCode, LikeKind, Outcome};
use sone_dom::{HIDDEN_CLASS, NodeId, Transition};
use tracing::{debug, trace};

use crate::actions::find_entity;
use crate::binding::Binding;
use crate::event::Flow;
use crate::guard::OutsideClickGuard;
use crate::page::{Page, PageState};

/// Class of the inserted confirm buttons.
const CONFIRM_CLASS: &str = "confirm";

/// What a delete button deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeleteTarget {
	Post(String),
	Reply(String),
}

impl DeleteTarget {
	fn kind(&self) -> LikeKind {
		match self {
			Self::Post(_) => LikeKind::Post,
			Self::Reply(_) => LikeKind::Reply,
		}
	}

	fn id(&self) -> &str {
		match self {
			Self::Post(id) | Self::Reply(id) => id,
		}
	}

	/// Message shown when the server refuses the deletion.
	fn refusal(&self, code: &ErrorCode) -> Cow<'static, str> {
		let noun = self.kind().as_str();
		match (self, code) {
			(Self::Post(_), ErrorCode::InvalidPostId) => "Invalid post ID given!".into(),
			(Self::Reply(_), ErrorCode::InvalidReplyId) => "Invalid reply ID given!".into(),
			(_, ErrorCode::AuthRequired) => "You need to be logged in.".into(),
			(_, ErrorCode::NotAuthorized) => format!("You are not allowed to delete this {noun}.").into(),
			(_, code) => format!("Could not delete {noun}: {code}").into(),
		}
	}
}

impl PageState {
	/// Enhances the delete buttons of every post and its replies.
	pub(crate) fn enhance_delete_buttons(&mut self, post_text: &str, reply_text: &str) {
		let root = self.doc.root();
		for post in self.doc.select(root, "#sone .post") {
			let Some(post_id) = self.doc.element_id(post).map(str::to_owned) else {
				continue;
			};
			for button in self.doc.select(post, "> .inner-part > .status-line .delete button") {
				self.enhance_delete_button(button, DeleteTarget::Post(post_id.clone()), post_text);
			}
			for reply in self.doc.select(post, ".reply") {
				self.enhance_reply_delete_button(reply, reply_text);
			}
		}
	}

	/// Enhances the delete buttons of one reply.
	pub(crate) fn enhance_reply_delete_button(&mut self, reply: NodeId, text: &str) {
		let Some(reply_id) = self.doc.element_id(reply).map(str::to_owned) else {
			return;
		};
		for button in self.doc.select(reply, ".delete button") {
			self.enhance_delete_button(button, DeleteTarget::Reply(reply_id.clone()), text);
		}
	}

	/// Inserts the hidden confirm button after `button` and binds both.
	///
	/// Confirm buttons and already enhanced buttons are left alone.
	pub(crate) fn enhance_delete_button(&mut self, button: NodeId, target: DeleteTarget, text: &str) {
		let enhanced = self
			.bindings
			.on(button)
			.iter()
			.any(|binding| matches!(binding, Binding::DeleteButton { .. } | Binding::ConfirmDelete { .. }));
		if enhanced || self.doc.has_class(button, CONFIRM_CLASS) {
			return;
		}

		let confirm = self.doc.create_element("button");
		self.doc.add_class(confirm, CONFIRM_CLASS);
		self.doc.set_attr(confirm, "type", "button");
		self.doc.set_text(confirm, text);
		self.doc.hide(confirm);
		if let Err(err) = self.doc.insert_after(button, confirm) {
			debug!(%button, %err, "delete button is detached");
			return;
		}
		trace!(%button, %confirm, id = target.id(), "enhanced delete button");
		self.bindings.bind(
			button,
			Binding::DeleteButton {
				target: target.clone(),
				confirm,
			},
		);
		self.bindings.bind(confirm, Binding::ConfirmDelete { target, button });
	}
}

impl Page {
	/// First click: swap the delete button for its confirm button.
	pub(crate) fn arm_delete(&self, button: NodeId, confirm: NodeId) -> Flow {
		self.with_state(|state| {
			state.guard.install(&mut state.doc, OutsideClickGuard { button, confirm });
			state.doc.transition(button, Transition::FadeOut);
			state.doc.transition(confirm, Transition::FadeIn);
		});
		Flow::Stop
	}

	/// Confirm click: issue the delete call.
	///
	/// The original button comes back unless the server confirmed the
	/// deletion, in which case the post or reply slides away. A refused or
	/// failed delete never leaves the entity without a delete control, so
	/// the user can retry.
	pub(crate) async fn confirm_delete(&self, confirm: NodeId, target: DeleteTarget, button: NodeId) -> Flow {
		self.with_state(|state| {
			state.guard.cancel();
			state.doc.transition(confirm, Transition::FadeOut);
		});

		let outcome = match &target {
			DeleteTarget::Post(id) => self.client().delete_post(id).await,
			DeleteTarget::Reply(id) => self.client().delete_reply(id).await,
		};
		let restore = |doc: &mut sone_dom::Document| {
			doc.remove_class(button, HIDDEN_CLASS);
			doc.transition(button, Transition::FadeIn);
		};
		match outcome {
			Outcome::Success(Ack {}) => self.with_document_mut(|doc| {
				match find_entity(doc, target.kind(), target.id()) {
					Some(entity) => doc.transition(entity, Transition::SlideUp),
					None => debug!(id = target.id(), "deleted entity no longer on the page"),
				}
			}),
			Outcome::ServerError(code) => {
				self.alert(&target.refusal(&code));
				self.with_document_mut(restore);
			}
			Outcome::TransportFailure => {
				debug!(id = target.id(), "delete not confirmed");
				self.with_document_mut(restore);
			}
		}
		Flow::Stop
	}
}
