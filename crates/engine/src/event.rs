use sone_dom::NodeId;

/// Kind of user event the host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// Pointer activation.
	Click,
	/// Form submission.
	Submit,
	/// The target gained focus.
	Focus,
	/// The target lost focus.
	Blur,
}

impl EventKind {
	/// Returns true for events that reach bindings on ancestors of the target.
	pub const fn bubbles(self) -> bool {
		matches!(self, Self::Click | Self::Submit)
	}
}

/// One user event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
	/// What happened.
	pub kind: EventKind,
	/// Node the event happened on.
	pub target: NodeId,
}

impl Event {
	/// A click on `target`.
	pub const fn click(target: NodeId) -> Self {
		Self {
			kind: EventKind::Click,
			target,
		}
	}

	/// Submission of the form `target` (or the form containing it).
	pub const fn submit(target: NodeId) -> Self {
		Self {
			kind: EventKind::Submit,
			target,
		}
	}

	/// `target` gained focus.
	pub const fn focus(target: NodeId) -> Self {
		Self {
			kind: EventKind::Focus,
			target,
		}
	}

	/// `target` lost focus.
	pub const fn blur(target: NodeId) -> Self {
		Self {
			kind: EventKind::Blur,
			target,
		}
	}
}

/// What the host should do with the event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	/// Run the default action (navigate, submit the form).
	Continue,
	/// The event was handled; skip the default action.
	Stop,
}
