use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

const PAGE: &str = r#"
<div id="sone">
	<div class="post" id="post-1">
		<div class="inner-part">
			<div class="status-line">
				<form class="like"><input type="hidden" name="post" value="post-1"/><button type="submit">Like</button></form>
				<span class="likes"><span class="like-count">0</span></span>
			</div>
		</div>
		<div class="replies">
			<div class="reply" id="reply-1">
				<div class="status-line"><form class="like"><button type="submit">Like</button></form></div>
			</div>
		</div>
		<div class="create-reply">
			<form>
				<textarea name="text" disabled="disabled"></textarea>
				<input class="reply-input default" name="text"/>
				<button type="button">Cancel</button>
				<button>Post</button>
			</form>
		</div>
	</div>
	<div id="notification-area">
		<div class="notification" id="n1">
			<form class="dismiss"><input type="hidden" name="notification" value=""/></form>
		</div>
	</div>
</div>"#;

fn page() -> Document {
	Document::from_markup(PAGE).expect("fixture markup parses")
}

fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
	nodes
		.iter()
		.map(|&n| match doc.element_id(n) {
			Some(id) => format!("#{id}"),
			None => format!("{}.{}", doc.tag(n).unwrap_or("?"), doc.classes(n).join(".")),
		})
		.collect()
}

#[rstest]
#[case::descendant(".post .like", 2)]
#[case::child(".status-line > form", 2)]
#[case::tag_and_class("span.likes", 1)]
#[case::nested_child("span.likes > span.like-count", 1)]
#[case::universal(".replies > *", 1)]
#[case::attribute_presence("input[name]", 3)]
#[case::attribute_value("input[name=notification]", 1)]
#[case::quoted_attribute_value("input[name=\"post\"]", 1)]
#[case::enabled_inputs("form :input:enabled", 7)]
#[case::submit_buttons(".create-reply button:submit", 1)]
#[case::id_then_descendant("#notification-area .notification", 1)]
#[case::no_match(".post .missing", 0)]
fn selects_from_root(#[case] selector: &str, #[case] expected: usize) {
	let doc = page();
	assert_eq!(doc.select(doc.root(), selector).len(), expected, "{selector}");
}

#[test]
fn anchored_selector_only_reaches_direct_children() {
	let doc = page();
	let post = doc.get_element_by_id("post-1").expect("post");

	let anchored = doc.select(post, "> .inner-part > .status-line .like");
	let unanchored = doc.select(post, ".status-line .like");

	assert_eq!(ids(&doc, &anchored), ["form.like"]);
	assert_eq!(unanchored.len(), 2);
	assert_ne!(anchored[0], unanchored[1]);
}

#[test]
fn scope_itself_never_matches() {
	let doc = page();
	let reply = doc.get_element_by_id("reply-1").expect("reply");

	assert!(doc.select(reply, ".reply").is_empty());
	assert_eq!(doc.select(reply, ".like").len(), 1);
}

#[test]
fn ancestor_steps_stay_inside_scope() {
	let doc = page();
	let replies = doc.select_first(doc.root(), ".replies").expect("replies");

	// `.post` is an ancestor of the scope, so it cannot satisfy the first step.
	assert!(doc.select(replies, ".post .like").is_empty());
}

#[test]
fn enabled_skips_disabled_controls() {
	let doc = page();
	let form = doc.select_first(doc.root(), ".create-reply form").expect("reply form");

	let fields = doc.select(form, ":input:enabled");
	let tags: Vec<_> = fields.iter().filter_map(|&n| doc.tag(n)).collect();

	assert_eq!(tags, ["input", "button", "button"]);
}

#[test]
fn button_without_type_is_submit() {
	let doc = page();
	let form = doc.select_first(doc.root(), ".create-reply form").expect("reply form");

	let submits = doc.select(form, "button:submit");

	assert_eq!(submits.len(), 1);
	assert_eq!(doc.text(submits[0]), "Post");
}

#[rstest]
#[case::empty("")]
#[case::dangling_combinator(".post >")]
#[case::unterminated_attribute("input[name=\"post]")]
#[case::unclosed_attribute("input[name")]
#[case::unknown_pseudo("input:checked")]
#[case::stray_character(".post,.reply")]
fn rejects_malformed_selectors(#[case] selector: &str) {
	assert!(matches!(Selector::parse(selector), Err(DomError::InvalidSelector { .. })), "{selector}");
}

#[test]
fn malformed_selector_matches_nothing() {
	let doc = page();
	assert!(doc.select(doc.root(), ".post >").is_empty());
	assert_eq!(doc.closest(doc.root(), "::"), None);
}

#[test]
fn parses_through_from_str() {
	let selector: Selector = ".post > .inner-part".parse().expect("valid selector");
	assert_eq!(selector, Selector::parse(".post>.inner-part").expect("valid selector"));
}
