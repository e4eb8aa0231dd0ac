//! Abstract tree-node interface.
//!
//! Pure traversals (entity lookup in particular) are written against
//! [`TreeNode`] so they can run over the arena document or any synthetic tree.

use crate::{Document, NodeId};

/// Read-only view of a node in some tree.
pub trait TreeNode: Sized {
	/// Returns the parent node.
	fn parent(&self) -> Option<Self>;

	/// Returns the child element nodes in order.
	fn children(&self) -> Vec<Self>;

	/// Returns true when the node carries `class`.
	fn has_class(&self, class: &str) -> bool;

	/// Returns an attribute value.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Returns the concatenated text content.
	fn text(&self) -> String;

	/// Iterates ancestors, nearest first, excluding `self`.
	fn ancestors(&self) -> impl Iterator<Item = Self> {
		std::iter::successors(self.parent(), Self::parent)
	}

	/// Returns the first descendant (depth-first, document order) carrying `class`.
	fn find_descendant(&self, class: &str) -> Option<Self> {
		for child in self.children() {
			if child.has_class(class) {
				return Some(child);
			}
			if let Some(found) = child.find_descendant(class) {
				return Some(found);
			}
		}
		None
	}
}

/// Borrowed view of one node of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
	doc: &'a Document,
	id: NodeId,
}

impl<'a> NodeRef<'a> {
	pub(crate) const fn new(doc: &'a Document, id: NodeId) -> Self {
		Self { doc, id }
	}

	/// Returns the node handle.
	pub const fn id(&self) -> NodeId {
		self.id
	}
}

impl TreeNode for NodeRef<'_> {
	fn parent(&self) -> Option<Self> {
		self.doc.parent(self.id).map(|id| Self::new(self.doc, id))
	}

	fn children(&self) -> Vec<Self> {
		self.doc
			.children(self.id)
			.iter()
			.filter(|&&c| self.doc.is_element(c))
			.map(|&c| Self::new(self.doc, c))
			.collect()
	}

	fn has_class(&self, class: &str) -> bool {
		self.doc.has_class(self.id, class)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.doc.attr(self.id, name).map(str::to_owned)
	}

	fn text(&self) -> String {
		self.doc.text(self.id)
	}
}
