//! Page markup builders and a scripted page for handler tests.

use std::sync::Arc;

use sone_client::{Endpoint, MockReply, MockTransport, RecordedRequest};
use sone_dom::{Document, NodeId};

use crate::alert::RecordingAlerter;
use crate::config::{EngineConfig, TranslationKeys};
use crate::page::Page;

pub(crate) const STATUS_PLACEHOLDER: &str = "What are you doing?";
pub(crate) const REPLY_PLACEHOLDER: &str = "Write a reply…";
pub(crate) const DELETE_POST_TEXT: &str = "Yes, delete this post";
pub(crate) const DELETE_REPLY_TEXT: &str = "Yes, delete this reply";
pub(crate) const CLICK_TO_SHOW_TEXT: &str = "Click to show more replies";

/// The logged-in page shell around `body`.
pub(crate) fn page(body: &str) -> String {
	format!(
		r#"<div id="sone" class="online">
	<div id="formPassword"> secret </div>
	<div id="notification-area">
		<form id="notification-dismiss-template" class="dismiss hidden">
			<input type="hidden" name="formPassword" value="secret"/>
			<input type="hidden" name="notification" value=""/>
			<button type="submit">Dismiss</button>
		</form>
		<div class="notification" id="first-start">
			<form class="dismiss">
				<input type="hidden" name="notification" value="first-start"/>
				<button type="submit">Dismiss</button>
			</form>
			Welcome to Sone!
		</div>
	</div>
	<div id="update-status">
		<form><input class="status-input" name="text" value=""/><button type="submit">Post</button></form>
	</div>
	<div class="sone abc_123 idle">
		<div class="id">abc~123</div>
		<div class="profile-link"><a>Old Name</a></div>
		<div class="last-update">Last update: <span class="time">yesterday</span></div>
		<form class="follow"><button type="submit">Follow</button></form>
		<form class="unfollow hidden"><button type="submit">Unfollow</button></form>
		<form class="lock"><button type="submit">Lock</button></form>
		<form class="unlock hidden"><button type="submit">Unlock</button></form>
	</div>
	{body}
</div>"#
	)
}

/// Like, count and delete controls of one status line.
pub(crate) fn status_line(time: &str) -> String {
	format!(
		r#"<div class="status-line">
	<span class="time">{time}</span>
	<form class="like"><button type="submit">Like</button></form>
	<form class="unlike hidden"><button type="submit">Unlike</button></form>
	<span class="likes hidden"><span title="">(<span class="like-count">0</span>)</span></span>
	<form class="delete"><button type="submit">Delete</button></form>
</div>"#
	)
}

/// A reply with its status line.
pub(crate) fn reply(id: &str) -> String {
	format!(
		r#"<div class="reply" id="{id}"><div class="inner-part">{}</div></div>"#,
		status_line("just now")
	)
}

/// A post with `replies` and an empty compose slot.
pub(crate) fn post(id: &str, replies: &[&str]) -> String {
	let replies: String = replies.iter().map(|id| reply(id)).collect();
	format!(
		r#"<div class="post" id="{id}">
	<div class="inner-part">{}</div>
	<div class="replies">
		{replies}
		<div class="create-reply">
			<form>
				<input type="hidden" name="formPassword" value="secret"/>
				<input class="reply-input" name="text" value=""/>
				<button type="submit">Reply</button>
			</form>
		</div>
	</div>
</div>"#,
		status_line("5 minutes ago")
	)
}

/// A page wired to a scripted transport and a recording alerter.
pub(crate) struct Fixture {
	pub(crate) page: Page,
	pub(crate) transport: Arc<MockTransport>,
	pub(crate) alerts: Arc<RecordingAlerter>,
}

impl Fixture {
	/// Builds the page from `body`, with every bootstrap translation cached.
	pub(crate) fn new(body: &str) -> Self {
		Self::with_markup(&page(body))
	}

	/// Builds a page from raw markup, with every bootstrap translation cached.
	pub(crate) fn with_markup(markup: &str) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let doc = Document::from_markup(markup).expect("fixture markup parses");
		let transport = Arc::new(MockTransport::new());
		let alerts = Arc::new(RecordingAlerter::default());
		let page = Page::new(doc, transport.clone(), alerts.clone(), EngineConfig::default());

		let keys = TranslationKeys::default();
		let translations = page.translations();
		translations.insert(keys.status_update_placeholder, STATUS_PLACEHOLDER);
		translations.insert(keys.reply_placeholder, REPLY_PLACEHOLDER);
		translations.insert(keys.delete_post_confirm, DELETE_POST_TEXT);
		translations.insert(keys.delete_reply_confirm, DELETE_REPLY_TEXT);
		translations.insert(keys.click_to_show_replies, CLICK_TO_SHOW_TEXT);

		Self { page, transport, alerts }
	}

	/// Builds and enhances the page from `body`.
	pub(crate) async fn enhanced(body: &str) -> Self {
		let fixture = Self::new(body);
		fixture.page.enhance().await;
		fixture.page.take_transitions();
		fixture
	}

	/// Queues `reply` for the next call to `endpoint`.
	pub(crate) fn script(&self, endpoint: Endpoint, reply: MockReply) -> &Self {
		self.transport.push(endpoint, reply);
		self
	}

	/// Returns the requests sent to `endpoint`.
	pub(crate) fn sent(&self, endpoint: Endpoint) -> Vec<RecordedRequest> {
		self.transport.requests_to(endpoint)
	}

	/// Returns the element with `id`.
	pub(crate) fn id(&self, id: &str) -> NodeId {
		self.page
			.with_document(|doc| doc.get_element_by_id(id))
			.unwrap_or_else(|| panic!("missing #{id}"))
	}

	/// Returns the first element matching `selector`.
	pub(crate) fn first(&self, selector: &str) -> NodeId {
		self.page
			.with_document(|doc| doc.select_first(doc.root(), selector))
			.unwrap_or_else(|| panic!("nothing matches {selector}"))
	}

	/// Returns every element matching `selector`.
	pub(crate) fn all(&self, selector: &str) -> Vec<NodeId> {
		self.page.with_document(|doc| doc.select(doc.root(), selector))
	}

	/// Returns true when `node` is attached and displayed.
	pub(crate) fn visible(&self, node: NodeId) -> bool {
		self.page.with_document(|doc| doc.is_visible(node))
	}

	pub(crate) fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.page.with_document(|doc| doc.has_class(node, class))
	}

	pub(crate) fn text(&self, node: NodeId) -> String {
		self.page.with_document(|doc| doc.text(node))
	}

	pub(crate) fn value(&self, node: NodeId) -> String {
		self.page.with_document(|doc| doc.value(node).to_owned())
	}

	/// Returns the ids of the notifications in the notification area.
	pub(crate) fn notification_ids(&self) -> Vec<String> {
		self.page.with_document(|doc| {
			doc.select(doc.root(), "#notification-area .notification")
				.into_iter()
				.filter_map(|node| doc.element_id(node).map(str::to_owned))
				.collect()
		})
	}
}
