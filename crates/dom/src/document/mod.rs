//! Arena document.
//!
//! All nodes live in one slab and refer to each other by [`NodeId`]. A node is attached when its parent chain reaches the root;
//! queries rooted at the document only ever see attached nodes.
//!
//! Detached nodes stay readable until [`Document::reclaim_detached`] frees
//! them. A freed key is reused under a bumped generation, so a handle to the
//! old node resolves to nothing instead of to the key's new occupant.

use slab::Slab;
use tracing::{trace, warn};

use crate::node::{Element, Node, NodeKind};
use crate::selector::Selector;
use crate::{DomError, HIDDEN_CLASS, NodeId, NodeRef, Result, Transition, TransitionRecord};

/// Mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Slab<Node>,
	/// Current generation of every slab key ever handed out.
	generations: Vec<u32>,
	root: NodeId,
	focused: Option<NodeId>,
	transitions: Vec<TransitionRecord>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document with a `body` root.
	pub fn new() -> Self {
		let mut doc = Self {
			nodes: Slab::new(),
			generations: Vec::new(),
			root: NodeId::default(),
			focused: None,
			transitions: Vec::new(),
		};
		doc.root = doc.create_element("body");
		doc
	}

	/// Parses `markup` and appends its top-level nodes to a fresh document.
	pub fn from_markup(markup: &str) -> Result<Self> {
		let mut doc = Self::new();
		let root = doc.root;
		for node in doc.parse_fragment(markup) {
			doc.append_child(root, node)?;
		}
		Ok(doc)
	}

	/// Returns the root element.
	pub const fn root(&self) -> NodeId {
		self.root
	}

	/// Returns a borrowed view of `node`.
	pub fn node(&self, node: NodeId) -> NodeRef<'_> {
		NodeRef::new(self, node)
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		let node = Node {
			kind,
			parent: None,
			children: Vec::new(),
		};
		let index = self.nodes.insert(node);
		if index == self.generations.len() {
			self.generations.push(0);
		}
		NodeId::new(index, self.generations[index])
	}

	fn current(&self, node: NodeId) -> bool {
		self.generations.get(node.index()) == Some(&node.generation())
	}

	fn get(&self, node: NodeId) -> Option<&Node> {
		if !self.current(node) {
			return None;
		}
		self.nodes.get(node.index())
	}

	fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
		if !self.current(node) {
			return None;
		}
		self.nodes.get_mut(node.index())
	}

	/// Returns true while `node` has not been reclaimed.
	pub fn exists(&self, node: NodeId) -> bool {
		self.get(node).is_some()
	}

	fn live(&self, node: NodeId) -> Result<()> {
		if self.exists(node) { Ok(()) } else { Err(DomError::Reclaimed(node)) }
	}

	/// Returns the number of nodes holding storage, detached ones included.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Frees every node that is neither attached nor part of a detached
	/// subtree with an undrained transition, returning how many were freed.
	///
	/// Handles to freed nodes go stale: they stop resolving and never alias
	/// a node created later.
	pub fn reclaim_detached(&mut self) -> usize {
		let mut keep = vec![false; self.generations.len()];
		let mut stack = vec![self.root];
		for record in &self.transitions {
			stack.push(self.ancestors(record.node).last().unwrap_or(record.node));
		}
		while let Some(node) = stack.pop() {
			if !self.exists(node) || keep[node.index()] {
				continue;
			}
			keep[node.index()] = true;
			stack.extend_from_slice(self.children(node));
		}

		let before = self.nodes.len();
		let generations = &mut self.generations;
		self.nodes.retain(|index, _| {
			if !keep[index] {
				generations[index] = generations[index].wrapping_add(1);
			}
			keep[index]
		});
		let freed = before - self.nodes.len();
		if freed > 0 {
			trace!(freed, live = self.node_count(), "reclaimed detached nodes");
		}
		freed
	}

	/// Creates a detached element.
	pub fn create_element(&mut self, tag: &str) -> NodeId {
		self.push(NodeKind::Element(Element::new(tag)))
	}

	/// Creates a detached text node.
	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeKind::Text(text.into()))
	}

	pub(crate) fn element(&self, node: NodeId) -> Option<&Element> {
		match &self.get(node)?.kind {
			NodeKind::Element(el) => Some(el),
			NodeKind::Text(_) => None,
		}
	}

	fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
		match &mut self.get_mut(node)?.kind {
			NodeKind::Element(el) => Some(el),
			NodeKind::Text(_) => None,
		}
	}

	// ---- structure -------------------------------------------------------

	/// Returns the parent of `node`.
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.get(node)?.parent
	}

	/// Returns the children of `node`, text nodes included.
	pub fn children(&self, node: NodeId) -> &[NodeId] {
		self.get(node).map_or(&[], |n| n.children.as_slice())
	}

	/// Iterates the ancestors of `node`, nearest first, excluding `node`.
	pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(self.parent(node), move |&n| self.parent(n))
	}

	/// Returns all descendants of `node` in document order, excluding `node`.
	pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.children(next).iter().rev());
		}
		out
	}

	/// Returns true when `ancestor` is a strict ancestor of `node`.
	pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		self.ancestors(node).any(|a| a == ancestor)
	}

	/// Returns true when `node` is the root or hangs below it.
	pub fn is_attached(&self, node: NodeId) -> bool {
		node == self.root || self.contains(self.root, node)
	}

	fn unlink(&mut self, node: NodeId) {
		let Some(parent) = self.get_mut(node).and_then(|n| n.parent.take()) else {
			return;
		};
		if let Some(parent) = self.get_mut(parent) {
			parent.children.retain(|&c| c != node);
		}
	}

	/// Links a detached `node` under `parent` at `position`, or last.
	fn link(&mut self, parent: NodeId, node: NodeId, position: Option<usize>) {
		if let Some(child) = self.get_mut(node) {
			child.parent = Some(parent);
		}
		if let Some(parent) = self.get_mut(parent) {
			let at = position.unwrap_or(parent.children.len()).min(parent.children.len());
			parent.children.insert(at, node);
		}
	}

	fn check_cycle(&self, parent: NodeId, node: NodeId) -> Result<()> {
		self.live(parent)?;
		self.live(node)?;
		if parent == node || self.contains(node, parent) {
			return Err(DomError::Cycle { node, parent });
		}
		Ok(())
	}

	/// Moves `child` to the end of `parent`'s children.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
		self.check_cycle(parent, child)?;
		self.unlink(child);
		self.link(parent, child, None);
		Ok(())
	}

	fn insert_at_sibling(&mut self, anchor: NodeId, node: NodeId, after: bool) -> Result<()> {
		let parent = self.parent(anchor).ok_or(DomError::Detached(anchor))?;
		if anchor == node {
			return Ok(());
		}
		self.check_cycle(parent, node)?;
		self.unlink(node);
		let pos = self
			.children(parent)
			.iter()
			.position(|&c| c == anchor)
			.ok_or(DomError::Detached(anchor))?;
		self.link(parent, node, Some(if after { pos + 1 } else { pos }));
		Ok(())
	}

	/// Moves `node` right before `anchor`.
	pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
		self.insert_at_sibling(anchor, node, false)
	}

	/// Moves `node` right after `anchor`.
	pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
		self.insert_at_sibling(anchor, node, true)
	}

	/// Puts `new` at the position of `old` and detaches `old`.
	pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> Result<()> {
		self.insert_before(old, new)?;
		self.detach(old);
		Ok(())
	}

	/// Removes `node` (and its subtree) from its parent.
	pub fn detach(&mut self, node: NodeId) {
		if self.focused.is_some_and(|f| f == node || self.contains(node, f)) {
			self.focused = None;
		}
		self.unlink(node);
	}

	/// Deep-copies `node` into a new detached subtree.
	///
	/// Returns `None` when `node` has been reclaimed.
	pub fn clone_subtree(&mut self, node: NodeId) -> Option<NodeId> {
		let kind = self.get(node)?.kind.clone();
		let copy = self.push(kind);
		for child in self.children(node).to_vec() {
			if let Some(child_copy) = self.clone_subtree(child) {
				self.link(copy, child_copy, None);
			}
		}
		Some(copy)
	}

	// ---- element data ----------------------------------------------------

	/// Returns true for element nodes.
	pub fn is_element(&self, node: NodeId) -> bool {
		self.element(node).is_some()
	}

	/// Returns the lower-case tag name of an element.
	pub fn tag(&self, node: NodeId) -> Option<&str> {
		self.element(node).map(|el| el.tag.as_str())
	}

	/// Returns an attribute value. The `class` attribute is exposed through
	/// [`Self::classes`] instead.
	pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node)?.attrs.get(name).map(String::as_str)
	}

	/// Returns the `id` attribute.
	pub fn element_id(&self, node: NodeId) -> Option<&str> {
		self.attr(node, "id")
	}

	/// Sets an attribute. Setting `class` replaces the class list.
	pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
		let value = value.into();
		let Some(el) = self.element_mut(node) else {
			return;
		};
		match name {
			"class" => el.classes = value.split_whitespace().map(str::to_owned).collect(),
			"disabled" => el.disabled = true,
			_ => {
				el.attrs.insert(name.to_owned(), value);
			}
		}
	}

	/// Removes an attribute.
	pub fn remove_attr(&mut self, node: NodeId, name: &str) {
		let Some(el) = self.element_mut(node) else {
			return;
		};
		match name {
			"class" => el.classes.clear(),
			"disabled" => el.disabled = false,
			_ => {
				el.attrs.shift_remove(name);
			}
		}
	}

	/// Returns the class list.
	pub fn classes(&self, node: NodeId) -> &[String] {
		self.element(node).map_or(&[], |el| el.classes.as_slice())
	}

	/// Returns true when the element carries `class`.
	pub fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.element(node).is_some_and(|el| el.has_class(class))
	}

	/// Adds `class` unless present.
	pub fn add_class(&mut self, node: NodeId, class: &str) {
		if let Some(el) = self.element_mut(node)
			&& !el.has_class(class)
		{
			el.classes.push(class.to_owned());
		}
	}

	/// Removes `class` if present.
	pub fn remove_class(&mut self, node: NodeId, class: &str) {
		if let Some(el) = self.element_mut(node) {
			el.classes.retain(|c| c != class);
		}
	}

	/// Adds `class` when `on`, removes it otherwise.
	pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
		if on {
			self.add_class(node, class);
		} else {
			self.remove_class(node, class);
		}
	}

	/// Returns the concatenated text of `node` and its descendants.
	pub fn text(&self, node: NodeId) -> String {
		std::iter::once(node)
			.chain(self.descendants(node))
			.filter_map(|n| match &self.get(n)?.kind {
				NodeKind::Text(t) => Some(t.as_str()),
				NodeKind::Element(_) => None,
			})
			.collect()
	}

	/// Replaces the children of `node` with a single text node.
	pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
		let Some(target) = self.get_mut(node) else {
			return;
		};
		if let NodeKind::Text(t) = &mut target.kind {
			*t = text.into();
			return;
		}
		for child in self.children(node).to_vec() {
			self.detach(child);
		}
		let text = self.create_text(text);
		self.link(node, text, None);
	}

	/// Returns the live form value.
	pub fn value(&self, node: NodeId) -> &str {
		self.element(node).map_or("", |el| el.value.as_str())
	}

	/// Sets the live form value.
	pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
		if let Some(el) = self.element_mut(node) {
			el.value = value.into();
		}
	}

	/// Returns true for disabled elements.
	pub fn is_disabled(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|el| el.disabled)
	}

	/// Enables or disables a form control.
	pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
		if let Some(el) = self.element_mut(node) {
			el.disabled = disabled;
		}
	}

	// ---- visibility ------------------------------------------------------

	/// Clears inline `display: none`.
	pub fn show(&mut self, node: NodeId) {
		if let Some(el) = self.element_mut(node) {
			el.display_none = false;
		}
	}

	/// Sets inline `display: none`.
	pub fn hide(&mut self, node: NodeId) {
		if let Some(el) = self.element_mut(node) {
			el.display_none = true;
		}
	}

	/// Returns true unless the element itself is hidden inline or by class.
	pub fn is_displayed(&self, node: NodeId) -> bool {
		self.element(node)
			.is_none_or(|el| !el.display_none && !el.has_class(HIDDEN_CLASS))
	}

	/// Returns true when `node` is attached and neither it nor an ancestor is hidden.
	pub fn is_visible(&self, node: NodeId) -> bool {
		self.is_attached(node) && self.is_displayed(node) && self.ancestors(node).all(|a| self.is_displayed(a))
	}

	/// Applies a transition's end state and records it for the host.
	pub fn transition(&mut self, node: NodeId, transition: Transition) {
		if transition.reveals() {
			self.show(node);
		} else {
			self.hide(node);
		}
		trace!(%node, ?transition, "transition");
		self.transitions.push(TransitionRecord { node, transition });
	}

	/// Drains the transitions recorded since the last call.
	pub fn take_transitions(&mut self) -> Vec<TransitionRecord> {
		std::mem::take(&mut self.transitions)
	}

	// ---- focus -----------------------------------------------------------

	/// Moves focus to `node`, returning the previously focused node.
	pub fn focus(&mut self, node: NodeId) -> Option<NodeId> {
		self.focused.replace(node).filter(|&prev| prev != node)
	}

	/// Clears focus, returning the previously focused node.
	pub fn blur(&mut self) -> Option<NodeId> {
		self.focused.take()
	}

	/// Returns the focused node.
	pub const fn focused(&self) -> Option<NodeId> {
		self.focused
	}

	// ---- queries ---------------------------------------------------------

	/// Finds the attached element whose `id` attribute equals `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.descendants(self.root)
			.into_iter()
			.find(|&n| self.element_id(n) == Some(id))
	}

	/// Returns the descendants of `scope` matching `selector`, in document order.
	///
	/// An unparseable selector matches nothing.
	pub fn select(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
		match Selector::parse(selector) {
			Ok(selector) => self.select_with(scope, &selector),
			Err(err) => {
				warn!(%err, "ignoring selector");
				Vec::new()
			}
		}
	}

	/// Returns the first descendant of `scope` matching `selector`.
	pub fn select_first(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
		self.select(scope, selector).into_iter().next()
	}

	/// Returns the descendants of `scope` matching a parsed selector.
	pub fn select_with(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
		self.descendants(scope)
			.into_iter()
			.filter(|&n| selector.matches(self, n, scope))
			.collect()
	}

	/// Returns `node` or its nearest ancestor matching `selector`.
	pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
		let selector = match Selector::parse(selector) {
			Ok(selector) => selector,
			Err(err) => {
				warn!(%err, "ignoring selector");
				return None;
			}
		};
		std::iter::once(node)
			.chain(self.ancestors(node))
			.take_while(|&n| n != self.root)
			.find(|&n| selector.matches(self, n, self.root))
	}
}
