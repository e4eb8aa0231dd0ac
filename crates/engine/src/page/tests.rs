use pretty_assertions::assert_eq;
use sone_client::{Endpoint, MockReply, MockTransport};

use super::*;
use crate::alert::RecordingAlerter;
use crate::config::TranslationKeys;
use crate::test_support::{Fixture, page, post};

fn bare_page(body: &str, config: EngineConfig) -> (Page, Arc<MockTransport>) {
	let doc = Document::from_markup(&page(body)).expect("fixture markup parses");
	let transport = Arc::new(MockTransport::new());
	let page = Page::new(doc, transport.clone(), Arc::new(RecordingAlerter::default()), config);
	(page, transport)
}

#[test]
fn form_password_is_read_from_the_page() {
	let f = Fixture::new("");

	assert_eq!(f.page.client().form_password().expose(), "secret");
}

#[test]
fn configured_form_password_wins() {
	let config = EngineConfig {
		form_password: Some("configured".to_owned()),
		..EngineConfig::default()
	};

	let (page, _) = bare_page("", config);

	assert_eq!(page.client().form_password().expose(), "configured");
}

#[test]
fn missing_form_password_is_empty() {
	let doc = Document::from_markup(r#"<div id="sone"/>"#).expect("markup parses");
	let page = Page::new(
		doc,
		Arc::new(MockTransport::new()),
		Arc::new(RecordingAlerter::default()),
		EngineConfig::default(),
	);

	assert_eq!(page.client().form_password().expose(), "");
}

#[tokio::test]
async fn enhance_skips_steps_without_translations() {
	let (page, transport) = bare_page(&post("post-1", &["reply-1", "reply-2", "reply-3"]), EngineConfig::default());
	transport.push(Endpoint::FollowSone, MockReply::ok());

	page.enhance().await;

	let keys = TranslationKeys::default();
	let requested: Vec<_> = transport
		.requests_to(Endpoint::GetTranslation)
		.iter()
		.filter_map(|request| request.param("key").map(str::to_owned))
		.collect();
	assert_eq!(
		requested,
		[
			keys.status_update_placeholder,
			keys.reply_placeholder,
			keys.delete_post_confirm,
			keys.click_to_show_replies,
		]
	);
	page.with_document(|doc| {
		let root = doc.root();
		assert!(doc.select(root, "textarea").is_empty());
		assert!(doc.select(root, "button.confirm").is_empty());
		assert!(doc.select(root, ".click-to-show").is_empty());
		assert!(doc.select(root, ".show-reply-form").is_empty());
	});

	let follow = page.with_document(|doc| doc.select_first(doc.root(), "#sone .follow"));
	let follow = follow.expect("follow form");
	assert_eq!(page.dispatch(Event::submit(follow)).await, Flow::Stop);
	assert_eq!(transport.requests_to(Endpoint::FollowSone).len(), 1);
}

#[tokio::test]
async fn translations_resolve_through_the_client() {
	let (page, transport) = bare_page("", EngineConfig::default());
	transport.translation("Comment");

	assert_eq!(page.translation("Some.Key").await.as_deref(), Some("Comment"));
	assert_eq!(page.translation("Some.Key").await.as_deref(), Some("Comment"));
	assert_eq!(transport.requests_to(Endpoint::GetTranslation).len(), 1);
}

#[tokio::test]
async fn unbound_events_continue() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	let text = f.first("#sone .profile-link a");

	assert_eq!(f.page.dispatch(Event::click(text)).await, Flow::Continue);
	assert_eq!(f.page.dispatch(Event::submit(text)).await, Flow::Continue);
	assert!(f.transport.requests().is_empty());
}

#[tokio::test]
async fn focus_and_blur_track_the_focused_node() {
	let f = Fixture::enhanced("").await;
	let link = f.first("#sone .profile-link a");

	f.page.dispatch(Event::focus(link)).await;
	assert_eq!(f.page.with_document(Document::focused), Some(link));

	f.page.dispatch(Event::blur(link)).await;
	assert_eq!(f.page.with_document(Document::focused), None);
}

#[tokio::test]
async fn enhance_wires_every_control() {
	let f = Fixture::enhanced(&post("post-1", &["reply-1"])).await;

	f.page.with_state(|state| {
		let doc = &state.doc;
		let bound = |selector: &str, kind: EventKind| {
			doc.select(doc.root(), selector)
				.into_iter()
				.all(|node| state.bindings.handles(node, kind))
		};
		assert!(bound("#sone .like", EventKind::Submit));
		assert!(bound("#sone .unlike", EventKind::Submit));
		assert!(bound("#sone .follow", EventKind::Submit));
		assert!(bound("#sone .unlock", EventKind::Submit));
		assert!(bound("button.confirm", EventKind::Click));
		assert!(bound(".create-reply button", EventKind::Click));
		assert!(bound("input.reply-input", EventKind::Focus));
		assert!(bound("#update-status input.status-input", EventKind::Focus));
		assert!(bound(".show-reply-form", EventKind::Click));
		assert!(bound("#first-start form.dismiss button", EventKind::Click));
	});
}
