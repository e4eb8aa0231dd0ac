use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sone_dom::Document;

use super::*;

/// Linear tree: each entry is the only child of the previous one.
#[derive(Clone, Copy)]
struct Chain<'a> {
	nodes: &'a [(&'a str, &'a str)],
	idx: usize,
}

impl TreeNode for Chain<'_> {
	fn parent(&self) -> Option<Self> {
		self.idx.checked_sub(1).map(|idx| Self { idx, ..*self })
	}

	fn children(&self) -> Vec<Self> {
		let idx = self.idx + 1;
		if idx < self.nodes.len() { vec![Self { idx, ..*self }] } else { Vec::new() }
	}

	fn has_class(&self, class: &str) -> bool {
		self.nodes[self.idx].0 == class
	}

	fn attribute(&self, name: &str) -> Option<String> {
		(name == "id" && !self.nodes[self.idx].1.is_empty()).then(|| self.nodes[self.idx].1.to_owned())
	}

	fn text(&self) -> String {
		String::new()
	}
}

const PAGE: &str = r#"
<div id="sone">
	<div class="sone abc_123">
		<div class="id"> abc~123 </div>
		<form class="follow"><button>Follow</button></form>
	</div>
	<div class="post" id="post-1">
		<div class="inner-part"><form class="like"><button>Like</button></form></div>
		<div class="replies">
			<div class="reply" id="reply-1"><form class="like"><button>Like</button></form></div>
		</div>
	</div>
</div>"#;

#[test]
fn works_over_any_tree() {
	let nodes = [("post", "post-9"), ("reply", "reply-3"), ("status-line", ""), ("like", "")];
	let like = Chain { nodes: &nodes, idx: 3 };

	assert_eq!(locate_reply(&like).as_deref(), Some("reply-3"));
	assert_eq!(locate_post(&like).as_deref(), Some("post-9"));
	assert_eq!(locate_sone(&like), None);
}

#[test]
fn node_itself_is_not_its_container() {
	let nodes = [("post", "post-9"), ("reply", "reply-3")];
	let reply = Chain { nodes: &nodes, idx: 1 };

	assert_eq!(locate_reply(&reply), None);
	assert_eq!(locate_post(&reply).as_deref(), Some("post-9"));
}

#[test]
fn resolves_entities_in_a_document() {
	let doc = Document::from_markup(PAGE).expect("fixture markup parses");
	let buttons = doc.select(doc.root(), "button");
	let [follow, post_like, reply_like] = buttons[..] else {
		panic!("expected three buttons, got {}", buttons.len());
	};

	assert_eq!(locate_sone(&doc.node(follow)).as_deref(), Some("abc~123"));
	assert_eq!(locate_post(&doc.node(follow)), None);
	assert_eq!(locate_post(&doc.node(post_like)).as_deref(), Some("post-1"));
	assert_eq!(locate_reply(&doc.node(post_like)), None);
	assert_eq!(locate_reply(&doc.node(reply_like)).as_deref(), Some("reply-1"));
	assert_eq!(locate_post(&doc.node(reply_like)).as_deref(), Some("post-1"));
}

#[test]
fn sanitizes_tilde() {
	assert_eq!(sanitize_id("abc~123"), "abc_123");
	assert_eq!(sanitize_id("nw-6x~Qz.Fw_0"), "nw-6x_Qz_Fw_0");
}

proptest! {
	#[test]
	fn sanitized_ids_use_class_safe_characters(id in any::<String>()) {
		let sanitized = sanitize_id(&id);
		prop_assert_eq!(sanitized.chars().count(), id.chars().count());
		prop_assert!(sanitized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
		prop_assert_eq!(sanitize_id(&id), sanitized.clone());
		prop_assert_eq!(sanitize_id(&sanitized), sanitized);
	}

	#[test]
	fn class_safe_ids_are_unchanged(id in "[A-Za-z0-9-]{0,40}") {
		prop_assert_eq!(sanitize_id(&id), id);
	}
}
