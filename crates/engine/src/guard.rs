//! One-shot outside-click subscription of the delete confirmation.

use sone_dom::{Document, NodeId, Transition};
use tracing::trace;

/// Pending delete confirmation: a click anywhere else puts the original
/// button back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutsideClickGuard {
	pub(crate) button: NodeId,
	pub(crate) confirm: NodeId,
}

impl OutsideClickGuard {
	fn revert(self, doc: &mut Document) {
		trace!(button = %self.button, "reverting delete confirmation");
		doc.transition(self.confirm, Transition::FadeOut);
		doc.transition(self.button, Transition::FadeIn);
	}
}

/// Holds at most one active guard.
#[derive(Debug, Default)]
pub(crate) struct GuardSlot(Option<OutsideClickGuard>);

impl GuardSlot {
	/// Activates `guard`, first reverting a different guard that is still
	/// active.
	pub(crate) fn install(&mut self, doc: &mut Document, guard: OutsideClickGuard) {
		if let Some(previous) = self.0.replace(guard)
			&& previous != guard
		{
			previous.revert(doc);
		}
	}

	/// Consumes the active guard by reverting it. Returns true if one fired.
	pub(crate) fn fire(&mut self, doc: &mut Document) -> bool {
		self.0.take().map(|guard| guard.revert(doc)).is_some()
	}

	/// Consumes the active guard without reverting it.
	pub(crate) fn cancel(&mut self) -> Option<OutsideClickGuard> {
		self.0.take()
	}

	/// Returns the active guard.
	pub(crate) const fn active(&self) -> Option<OutsideClickGuard> {
		self.0
	}
}
