use crate::NodeId;

/// Animated visibility change.
///
/// The document applies the end state immediately; the host replays the
/// recorded transitions to animate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
	/// Reveal by expanding vertically.
	SlideDown,
	/// Hide by collapsing vertically.
	SlideUp,
	/// Reveal by fading in.
	FadeIn,
	/// Hide by fading out.
	FadeOut,
}

impl Transition {
	/// Returns true when the node ends up displayed.
	pub const fn reveals(self) -> bool {
		matches!(self, Self::SlideDown | Self::FadeIn)
	}
}

/// One transition applied to one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
	/// Node that changed visibility.
	pub node: NodeId,
	/// The transition that was applied.
	pub transition: Transition,
}
