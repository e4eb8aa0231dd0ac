//! Mapping page elements to the entities they belong to.
//!
//! Every lookup walks the ancestors of a node, the node itself excluded, and
//! stops at the nearest container. A missing container yields `None`, which
//! callers treat as "not applicable".

use sone_dom::TreeNode;

/// Container class of posts.
pub const POST_CLASS: &str = "post";
/// Container class of replies.
pub const REPLY_CLASS: &str = "reply";
/// Container class of Sone widgets.
pub const SONE_CLASS: &str = "sone";

/// Returns the nearest ancestor of `node` carrying `class`.
pub fn container<N: TreeNode>(node: &N, class: &str) -> Option<N> {
	node.ancestors().find(|ancestor| ancestor.has_class(class))
}

/// Returns the id of the post `node` belongs to.
pub fn locate_post<N: TreeNode>(node: &N) -> Option<String> {
	container(node, POST_CLASS)?.attribute("id")
}

/// Returns the id of the reply `node` belongs to.
pub fn locate_reply<N: TreeNode>(node: &N) -> Option<String> {
	container(node, REPLY_CLASS)?.attribute("id")
}

/// Returns the id of the Sone `node` belongs to, read from the `.id`
/// element of the widget.
pub fn locate_sone<N: TreeNode>(node: &N) -> Option<String> {
	let id = container(node, SONE_CLASS)?.find_descendant("id")?.text();
	Some(id.trim().to_owned())
}

/// Maps a Sone id onto the class that marks its widgets.
///
/// Every character outside `[A-Za-z0-9-]` becomes `_`, so distinct ids can
/// collide.
pub fn sanitize_id(id: &str) -> String {
	id.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
		.collect()
}

#[cfg(test)]
mod tests;
