use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Endpoint, FormPassword, MockReply, MockTransport};

fn translations() -> (Arc<MockTransport>, Translations) {
	let transport = Arc::new(MockTransport::new());
	let client = ActionClient::new(transport.clone(), FormPassword::new("secret"));
	(transport, Translations::new(client))
}

#[tokio::test]
async fn fetches_once_then_serves_from_cache() {
	let (transport, translations) = translations();
	transport.translation("Comment");

	assert_eq!(translations.resolve("View.Post.Comment").await.as_deref(), Some("Comment"));
	assert_eq!(translations.resolve("View.Post.Comment").await.as_deref(), Some("Comment"));

	let requests = transport.requests_to(Endpoint::GetTranslation);
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].param("key"), Some("View.Post.Comment"));
	assert_eq!(requests[0].param("formPassword"), None);
}

#[tokio::test]
async fn failures_are_not_cached() {
	let (transport, translations) = translations();
	transport
		.push(Endpoint::GetTranslation, MockReply::error("unknown-key"))
		.translation("Reply");

	assert_eq!(translations.resolve("WebInterface.DefaultText.Reply").await, None);
	assert_eq!(translations.cached("WebInterface.DefaultText.Reply"), None);
	assert_eq!(
		translations.resolve("WebInterface.DefaultText.Reply").await.as_deref(),
		Some("Reply")
	);
	assert_eq!(transport.requests_to(Endpoint::GetTranslation).len(), 2);
}

#[tokio::test]
async fn seeded_entries_skip_the_server() {
	let (transport, translations) = translations();
	translations.insert("WebInterface.ClickToShow.Replies", "Show all replies");

	assert_eq!(
		translations.resolve("WebInterface.ClickToShow.Replies").await.as_deref(),
		Some("Show all replies")
	);
	assert!(transport.requests().is_empty());
}
