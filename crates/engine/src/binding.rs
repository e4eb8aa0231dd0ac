//! Event bindings installed by the bootstrap.

use std::collections::HashMap;

use sone_client::LikeKind;
use sone_dom::{Document, NodeId};

use crate::actions::SoneAction;
use crate::delete::DeleteTarget;
use crate::event::EventKind;

/// Behaviour attached to one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Binding {
	/// Like form of a post or reply.
	Like(LikeKind),
	/// Unlike form of a post or reply.
	Unlike(LikeKind),
	/// Follow, unfollow, lock or unlock form.
	SoneToggle(SoneAction),
	/// Original delete button, paired with its hidden confirm button.
	DeleteButton { target: DeleteTarget, confirm: NodeId },
	/// Confirm button inserted next to a delete button.
	ConfirmDelete { target: DeleteTarget, button: NodeId },
	/// Single-line input standing in for a textarea.
	CollapsedInput { expanded: NodeId },
	/// Textarea that collapses back to its input when left empty.
	ExpandedInput { collapsed: NodeId, placeholder: String },
	/// Form that must not submit while `field` is empty.
	GuardedForm { field: NodeId },
	/// Submit button of a reply form.
	SubmitReply,
	/// "Comment" trigger revealing the compose slot of its post.
	ShowReplyForm,
	/// Control revealing truncated replies.
	ClickToShow,
	/// Dismiss button of a notification.
	DismissNotification,
	/// Form whose native submission is replaced by a click binding.
	SuppressSubmit,
}

impl Binding {
	/// Event kind the binding answers to.
	pub(crate) const fn trigger(&self) -> EventKind {
		match self {
			Self::Like(_) | Self::Unlike(_) | Self::SoneToggle(_) | Self::GuardedForm { .. } | Self::SuppressSubmit => {
				EventKind::Submit
			}
			Self::CollapsedInput { .. } => EventKind::Focus,
			Self::ExpandedInput { .. } => EventKind::Blur,
			Self::DeleteButton { .. }
			| Self::ConfirmDelete { .. }
			| Self::SubmitReply
			| Self::ShowReplyForm
			| Self::ClickToShow
			| Self::DismissNotification => EventKind::Click,
		}
	}

	/// Returns true when a click on this binding must not reach the
	/// outside-click guard.
	pub(crate) const fn consumes_click(&self) -> bool {
		matches!(self, Self::DeleteButton { .. } | Self::ConfirmDelete { .. })
	}
}

/// Bindings by node.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
	map: HashMap<NodeId, Vec<Binding>>,
}

impl Bindings {
	/// Attaches `binding` to `node`. Returns false if an equal binding is
	/// already attached.
	pub(crate) fn bind(&mut self, node: NodeId, binding: Binding) -> bool {
		let slot = self.map.entry(node).or_default();
		if slot.contains(&binding) {
			return false;
		}
		slot.push(binding);
		true
	}

	/// Returns the bindings of `node`.
	pub(crate) fn on(&self, node: NodeId) -> &[Binding] {
		self.map.get(&node).map_or(&[], Vec::as_slice)
	}

	/// Returns true if `node` has a binding answering to `kind`.
	#[cfg(test)]
	pub(crate) fn handles(&self, node: NodeId, kind: EventKind) -> bool {
		self.on(node).iter().any(|binding| binding.trigger() == kind)
	}

	/// Finds the binding an event on `target` reaches: the target's own, or
	/// for bubbling events the nearest bound ancestor's.
	pub(crate) fn resolve(&self, doc: &Document, kind: EventKind, target: NodeId) -> Option<(NodeId, Binding)> {
		let ancestors = doc.ancestors(target).take_while(|_| kind.bubbles());
		std::iter::once(target).chain(ancestors).find_map(|node| {
			self.on(node)
				.iter()
				.find(|binding| binding.trigger() == kind)
				.map(|binding| (node, binding.clone()))
		})
	}

	/// Drops bindings of nodes no longer attached to the document.
	pub(crate) fn prune(&mut self, doc: &Document) {
		self.map.retain(|&node, _| doc.is_attached(node));
	}

	/// Number of bound nodes.
	pub(crate) fn len(&self) -> usize {
		self.map.len()
	}
}
