use std::fmt;

use indexmap::IndexMap;

/// Handle to a node inside a [`crate::Document`].
///
/// A handle to a detached node keeps resolving until the document reclaims
/// it. After that it resolves to nothing, even once its key is reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	index: usize,
	generation: u32,
}

impl NodeId {
	pub(crate) const fn new(index: usize, generation: u32) -> Self {
		Self { index, generation }
	}

	pub(crate) const fn index(self) -> usize {
		self.index
	}

	pub(crate) const fn generation(self) -> u32 {
		self.generation
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.generation {
			0 => write!(f, "#{}", self.index),
			generation => write!(f, "#{}v{generation}", self.index),
		}
	}
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
	pub(crate) kind: NodeKind,
	pub(crate) parent: Option<NodeId>,
	pub(crate) children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
	Element(Element),
	Text(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
	/// Lower-case tag name.
	pub(crate) tag: String,
	/// Attributes other than `class`, in source order.
	pub(crate) attrs: IndexMap<String, String>,
	pub(crate) classes: Vec<String>,
	/// Live form value (`input`/`textarea`), independent of the `value` attribute.
	pub(crate) value: String,
	pub(crate) disabled: bool,
	/// Inline `display: none`, the state toggled by show/hide and transitions.
	pub(crate) display_none: bool,
}

impl Element {
	pub(crate) fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			..Self::default()
		}
	}

	pub(crate) fn has_class(&self, class: &str) -> bool {
		self.classes.iter().any(|c| c == class)
	}

	pub(crate) fn is_form_control(&self) -> bool {
		matches!(self.tag.as_str(), "input" | "textarea" | "select" | "button")
	}

	pub(crate) fn is_submit(&self) -> bool {
		match self.tag.as_str() {
			"button" => self.attrs.get("type").is_none_or(|t| t.eq_ignore_ascii_case("submit")),
			"input" => self.attrs.get("type").is_some_and(|t| t.eq_ignore_ascii_case("submit")),
			_ => false,
		}
	}
}
