use thiserror::Error;

use crate::NodeId;

/// A convenient type alias for `Result` with `E` = [`DomError`].
pub type Result<T, E = DomError> = std::result::Result<T, E>;

/// Errors raised by document mutations and selector parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomError {
	/// The anchor of a sibling insertion or replacement has no parent.
	#[error("node {0} is not attached to a parent")]
	Detached(NodeId),

	/// The mutation would make a node its own ancestor.
	#[error("inserting node {node} under {parent} would create a cycle")]
	Cycle {
		/// Node being inserted.
		node: NodeId,
		/// Requested parent.
		parent: NodeId,
	},

	/// The target of an element-only operation is a text node.
	#[error("node {0} is not an element")]
	NotAnElement(NodeId),

	/// A selector string could not be parsed.
	#[error("invalid selector {selector:?}: {reason}")]
	InvalidSelector {
		/// The selector source.
		selector: String,
		/// Why parsing stopped.
		reason: String,
	},

	/// The node was freed by [`crate::Document::reclaim_detached`].
	#[error("node {0} has been reclaimed")]
	Reclaimed(NodeId),
}
