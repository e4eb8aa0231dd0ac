use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sone_client::{Endpoint, MockReply};

use super::*;
use crate::event::Event;
use crate::test_support::{Fixture, post};

fn likes(count: u32, names: &[&str]) -> MockReply {
	let sones: Vec<_> = names.iter().map(|name| json!({ "name": name })).collect();
	MockReply::success(json!({ "likes": count, "sones": sones }))
}

#[tokio::test]
async fn like_flips_controls_and_renders_recount() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	f.script(Endpoint::Like, MockReply::ok())
		.script(Endpoint::GetLikes, likes(3, &["A", "B", "C"]));
	let like = f.first("#post-1 > .inner-part .like");
	let unlike = f.first("#post-1 > .inner-part .unlike");

	let flow = f.page.dispatch(Event::submit(like)).await;

	assert_eq!(flow, Flow::Stop);
	let sent = f.sent(Endpoint::Like);
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].param("type"), Some("post"));
	assert_eq!(sent[0].param("post"), Some("post-1"));
	assert_eq!(sent[0].param("formPassword"), Some("secret"));
	assert_eq!(f.sent(Endpoint::GetLikes)[0].param("formPassword"), None);

	assert!(!f.visible(like));
	assert!(f.visible(unlike));
	assert!(f.visible(f.first("#post-1 .likes")));
	assert_eq!(f.text(f.first("#post-1 .like-count")), "3");
	let title = f.page.with_document(|doc| {
		let span = doc.select_first(doc.root(), "#post-1 .likes > span")?;
		doc.attr(span, "title").map(str::to_owned)
	});
	assert_eq!(title.as_deref(), Some("A\nB\nC"));
}

#[tokio::test]
async fn reply_like_targets_the_reply_only() {
	let f = Fixture::enhanced(&post("post-1", &["reply-1"])).await;
	f.script(Endpoint::Like, MockReply::ok()).script(Endpoint::GetLikes, likes(0, &[]));
	let reply_like = f.first("#reply-1 .like");
	let post_like = f.first("#post-1 > .inner-part .like");

	f.page.dispatch(Event::submit(reply_like)).await;

	let sent = f.sent(Endpoint::Like);
	assert_eq!(sent[0].param("type"), Some("reply"));
	assert_eq!(sent[0].param("reply"), Some("reply-1"));
	assert!(!f.visible(reply_like));
	assert!(f.visible(f.first("#reply-1 .unlike")));
	assert!(f.visible(post_like));
	assert!(!f.visible(f.first("#reply-1 .likes")), "zero likes stay hidden");
}

#[tokio::test]
async fn unlike_restores_like_control() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	f.script(Endpoint::Unlike, MockReply::ok()).script(Endpoint::GetLikes, likes(1, &["A"]));
	let like = f.first("#post-1 > .inner-part .like");
	let unlike = f.first("#post-1 > .inner-part .unlike");

	f.page.dispatch(Event::submit(unlike)).await;

	assert_eq!(f.sent(Endpoint::Unlike).len(), 1);
	assert!(f.has_class(unlike, HIDDEN_CLASS));
	assert!(f.visible(like));
	assert_eq!(f.text(f.first("#post-1 .like-count")), "1");
}

#[tokio::test]
async fn refused_like_alerts_and_changes_nothing() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	f.script(Endpoint::Like, MockReply::error("not-authorized"));
	let like = f.first("#post-1 > .inner-part .like");

	f.page.dispatch(Event::submit(like)).await;

	assert_eq!(f.alerts.messages(), ["not-authorized"]);
	assert!(f.visible(like));
	assert!(f.sent(Endpoint::GetLikes).is_empty());
}

#[tokio::test]
async fn failed_like_is_silent() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	let like = f.first("#post-1 > .inner-part .like");

	f.page.dispatch(Event::submit(like)).await;

	assert_eq!(f.sent(Endpoint::Like).len(), 1);
	assert!(f.alerts.messages().is_empty());
	assert!(f.visible(like));
	assert!(!f.visible(f.first("#post-1 > .inner-part .unlike")));
}

#[tokio::test]
async fn failed_recount_keeps_stale_count() {
	let f = Fixture::enhanced(&post("post-1", &[])).await;
	f.script(Endpoint::Like, MockReply::ok())
		.script(Endpoint::GetLikes, MockReply::error("invalid-post-id"));
	let like = f.first("#post-1 > .inner-part .like");

	f.page.dispatch(Event::submit(like)).await;

	assert!(!f.visible(like));
	assert_eq!(f.text(f.first("#post-1 .like-count")), "0");
	assert!(f.alerts.messages().is_empty());
}

#[tokio::test]
async fn follow_swaps_for_unfollow() {
	let f = Fixture::enhanced("").await;
	f.script(Endpoint::FollowSone, MockReply::ok());
	let follow = f.first("#sone .follow");

	let flow = f.page.dispatch(Event::submit(follow)).await;

	assert_eq!(flow, Flow::Stop);
	let sent = f.sent(Endpoint::FollowSone);
	assert_eq!(sent[0].param("sone"), Some("abc~123"));
	assert_eq!(sent[0].param("formPassword"), Some("secret"));
	assert!(!f.visible(follow));
	assert!(f.visible(f.first("#sone .unfollow")));
	assert!(f.visible(f.first("#sone .lock")), "lock pair is untouched");
}

#[tokio::test]
async fn submit_from_button_reaches_the_form() {
	let f = Fixture::enhanced("").await;
	f.script(Endpoint::LockSone, MockReply::ok());
	let button = f.first("#sone .lock button");

	f.page.dispatch(Event::submit(button)).await;

	assert_eq!(f.sent(Endpoint::LockSone).len(), 1);
	assert!(!f.visible(f.first("#sone .lock")));
	assert!(f.visible(f.first("#sone .unlock")));
}

#[tokio::test]
async fn refused_unlock_alerts_and_keeps_controls() {
	let f = Fixture::enhanced("").await;
	f.script(Endpoint::UnlockSone, MockReply::error("invalid-sone-id"));
	let unlock = f.first("#sone .unlock");

	f.page.dispatch(Event::submit(unlock)).await;

	assert_eq!(f.alerts.messages(), ["invalid-sone-id"]);
	assert!(f.has_class(unlock, HIDDEN_CLASS));
	assert!(f.visible(f.first("#sone .lock")));
}

#[rstest]
#[case(SoneAction::Follow, "follow", SoneAction::Unfollow)]
#[case(SoneAction::Unfollow, "unfollow", SoneAction::Follow)]
#[case(SoneAction::Lock, "lock", SoneAction::Unlock)]
#[case(SoneAction::Unlock, "unlock", SoneAction::Lock)]
fn sone_actions_pair_up(#[case] action: SoneAction, #[case] class: &str, #[case] counterpart: SoneAction) {
	assert_eq!(action.class(), class);
	assert_eq!(action.counterpart(), counterpart);
	assert_eq!(action.counterpart().counterpart(), action);
}

#[test]
fn find_entity_checks_the_container_class() {
	let doc = Document::from_markup(r#"<div class="post" id="p"><div class="reply" id="r"/></div>"#)
		.expect("markup parses");

	assert!(find_entity(&doc, LikeKind::Post, "p").is_some());
	assert!(find_entity(&doc, LikeKind::Reply, "r").is_some());
	assert_eq!(find_entity(&doc, LikeKind::Reply, "p"), None);
	assert_eq!(find_entity(&doc, LikeKind::Post, "missing"), None);
}
