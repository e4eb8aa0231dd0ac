//! Reply composition: input swaps, comment triggers, submission and reply
//! truncation.
//!
//! Compose fields start as single-line inputs showing a placeholder. Focus
//! swaps them for a textarea; leaving the textarea empty swaps back.

use sone_client::{LikeKind, Outcome};
use sone_dom::{HIDDEN_CLASS, NodeId};
use tracing::{debug, trace, warn};

use crate::actions::find_entity;
use crate::binding::Binding;
use crate::event::Flow;
use crate::locator::{POST_CLASS, REPLY_CLASS, locate_post};
use crate::page::{Page, PageState};

/// Class of a collapsed input showing its placeholder.
const DEFAULT_CLASS: &str = "default";
/// Class dimming an idle compose slot.
const LIGHT_CLASS: &str = "light";
/// Class of a post's compose slot.
const COMPOSE_SLOT_CLASS: &str = "create-reply";
/// Class of the "Comment" trigger.
const SHOW_REPLY_FORM_CLASS: &str = "show-reply-form";
/// Class of the truncated replies toggle.
const CLICK_TO_SHOW_CLASS: &str = "click-to-show";
/// Label of the "Comment" trigger.
const COMMENT_LABEL: &str = "Comment";

impl PageState {
	/// Returns true when the page is served to a logged-in, online user.
	fn is_online(&self) -> bool {
		self.doc
			.get_element_by_id("sone")
			.is_some_and(|sone| self.doc.has_class(sone, "online"))
	}

	/// Pairs every input matching `selector` with a hidden textarea.
	pub(crate) fn register_input_swap(&mut self, selector: &str, placeholder: &str) {
		let root = self.doc.root();
		for input in self.doc.select(root, selector) {
			let paired = self
				.bindings
				.on(input)
				.iter()
				.any(|binding| matches!(binding, Binding::CollapsedInput { .. }));
			if paired {
				continue;
			}

			let textarea = self.doc.create_element("textarea");
			if let Some(name) = self.doc.attr(input, "name").map(str::to_owned) {
				self.doc.set_attr(textarea, "name", name);
			}
			let value = self.doc.value(input).to_owned();
			self.doc.set_value(textarea, value.as_str());
			self.doc.hide(textarea);
			if let Err(err) = self.doc.insert_after(input, textarea) {
				debug!(%input, %err, "compose input is detached");
				continue;
			}
			self.bindings.bind(
				textarea,
				Binding::ExpandedInput {
					collapsed: input,
					placeholder: placeholder.to_owned(),
				},
			);
			self.bindings.bind(input, Binding::CollapsedInput { expanded: textarea });

			if value.is_empty() {
				self.doc.add_class(input, DEFAULT_CLASS);
				self.doc.set_value(input, placeholder);
			} else {
				self.doc.hide(input);
				self.doc.set_disabled(input, true);
				self.doc.show(textarea);
			}
			if let Some(form) = self.doc.closest(input, "form") {
				self.bindings.bind(form, Binding::GuardedForm { field: textarea });
			}
			trace!(%input, %textarea, "registered input swap");
		}
	}

	/// Swaps a focused input for its textarea.
	pub(crate) fn expand_input(&mut self, input: NodeId, textarea: NodeId) {
		self.doc.hide(input);
		self.doc.set_disabled(input, true);
		self.doc.show(textarea);
		self.doc.focus(textarea);
		if let Some(slot) = self.doc.closest(input, &format!(".{COMPOSE_SLOT_CLASS}")) {
			self.doc.remove_class(slot, LIGHT_CLASS);
		}
	}

	/// Swaps an empty textarea back for its input showing `placeholder`.
	pub(crate) fn collapse_input(&mut self, textarea: NodeId, input: NodeId, placeholder: &str) {
		if !self.doc.value(textarea).is_empty() {
			return;
		}
		self.doc.hide(textarea);
		self.doc.show(input);
		self.doc.set_disabled(input, false);
		self.doc.add_class(input, DEFAULT_CLASS);
		self.doc.set_value(input, placeholder);
		if let Some(slot) = self.doc.closest(input, &format!(".{COMPOSE_SLOT_CLASS}")) {
			self.doc.add_class(slot, LIGHT_CLASS);
		}
	}

	/// Adds "Comment" triggers to every post of an online page.
	pub(crate) fn add_comment_links(&mut self) {
		if !self.is_online() {
			return;
		}
		let root = self.doc.root();
		for post in self.doc.select(root, &format!("#sone .{POST_CLASS}")) {
			self.add_comment_links_in(post);
		}
	}

	/// Adds "Comment" triggers after the status line times below `scope` and
	/// hides the compose slots there.
	pub(crate) fn add_comment_links_in(&mut self, scope: NodeId) {
		for time in self.doc.select(scope, ".status-line .time") {
			let next = self.doc.parent(time).and_then(|parent| {
				let siblings = self.doc.children(parent);
				let pos = siblings.iter().position(|&sibling| sibling == time)?;
				siblings.get(pos + 1).copied()
			});
			if next.is_some_and(|next| self.doc.has_class(next, SHOW_REPLY_FORM_CLASS)) {
				continue;
			}
			let trigger = self.doc.create_element("div");
			self.doc.add_class(trigger, SHOW_REPLY_FORM_CLASS);
			let label = self.doc.create_element("span");
			self.doc.set_text(label, COMMENT_LABEL);
			if let Err(err) = self
				.doc
				.append_child(trigger, label)
				.and_then(|()| self.doc.insert_after(time, trigger))
			{
				debug!(%time, %err, "cannot place comment trigger");
				continue;
			}
			self.bindings.bind(trigger, Binding::ShowReplyForm);
		}
		for slot in self.doc.select(scope, &format!(".{COMPOSE_SLOT_CLASS}")) {
			self.doc.add_class(slot, HIDDEN_CLASS);
		}
	}

	/// Reveals the compose slot of the post owning `trigger` and focuses its
	/// field.
	pub(crate) fn reveal_reply_form(&mut self, trigger: NodeId) {
		let Some(slot) = self
			.doc
			.closest(trigger, &format!(".{POST_CLASS}"))
			.and_then(|post| self.doc.select_first(post, &format!(".{COMPOSE_SLOT_CLASS}")))
		else {
			debug!(%trigger, "comment trigger without compose slot");
			return;
		};
		self.doc.remove_class(slot, HIDDEN_CLASS);
		self.doc.remove_class(slot, LIGHT_CLASS);

		let Some(input) = self.doc.select_first(slot, "input.reply-input") else {
			return;
		};
		let expanded = self.bindings.on(input).iter().find_map(|binding| match binding {
			Binding::CollapsedInput { expanded } => Some(*expanded),
			_ => None,
		});
		match expanded {
			Some(textarea) if !self.doc.is_disabled(input) => self.expand_input(input, textarea),
			Some(textarea) => {
				self.doc.focus(textarea);
			}
			None => {
				self.doc.focus(input);
			}
		}
	}

	/// Wires the submit buttons of every compose slot.
	pub(crate) fn bind_reply_submits(&mut self) {
		let root = self.doc.root();
		let buttons = self.doc.select(root, &format!("#sone .{COMPOSE_SLOT_CLASS} button:submit"));
		self.bind_all(buttons, &Binding::SubmitReply);
	}

	/// Hides all but the latest `visible` replies of every post behind a
	/// toggle labelled `text`.
	pub(crate) fn truncate_replies(&mut self, text: &str, visible: usize) {
		let root = self.doc.root();
		for container in self.doc.select(root, &format!("#sone .{POST_CLASS} .replies")) {
			if self.doc.select_first(container, &format!(".{CLICK_TO_SHOW_CLASS}")).is_some() {
				continue;
			}
			let replies = self.doc.select(container, &format!(".{REPLY_CLASS}"));
			let Some(hidden) = replies.len().checked_sub(visible).filter(|&count| count > 0) else {
				continue;
			};
			let older = &replies[..hidden];
			let fresh = older.iter().any(|&reply| self.doc.has_class(reply, "new"));
			for &reply in older {
				self.doc.add_class(reply, HIDDEN_CLASS);
			}

			let toggle = self.doc.create_element("div");
			self.doc.add_class(toggle, CLICK_TO_SHOW_CLASS);
			if fresh {
				self.doc.add_class(toggle, "new");
			}
			self.doc.set_text(toggle, text);
			if self.doc.insert_before(replies[0], toggle).is_ok() {
				self.bindings.bind(toggle, Binding::ClickToShow);
			}
			trace!(%container, hidden, "truncated replies");
		}
	}

	/// Reveals every reply next to `toggle` and hides the toggle.
	pub(crate) fn reveal_replies(&mut self, toggle: NodeId) {
		if let Some(container) = self.doc.closest(toggle, ".replies") {
			for reply in self.doc.select(container, &format!(".{REPLY_CLASS}")) {
				self.doc.remove_class(reply, HIDDEN_CLASS);
			}
		}
		self.doc.add_class(toggle, HIDDEN_CLASS);
	}
}

impl Page {
	/// Sends the reply typed into the form owning `button`.
	pub(crate) async fn submit_reply(&self, button: NodeId) -> Flow {
		let prepared = self.with_state(|state| {
			let doc = &mut state.doc;
			let form = doc.closest(button, "form")?;
			let post = locate_post(&doc.node(form))?;
			let field = doc.select(form, ":input:enabled").into_iter().find(|&node| {
				matches!(doc.tag(node), Some("input" | "textarea"))
					&& !matches!(doc.attr(node, "type"), Some("hidden" | "submit"))
					&& !doc.has_class(node, DEFAULT_CLASS)
			})?;
			let text = doc.value(field).to_owned();
			if text.trim().is_empty() {
				return None;
			}
			doc.set_value(field, "");
			Some((post, text))
		});
		let Some((post, text)) = prepared else {
			debug!(%button, "nothing to reply");
			return Flow::Stop;
		};

		match self.client().create_reply(&post, &text).await {
			Outcome::Success(reply) => self.show_new_reply(&post, &reply).await,
			Outcome::ServerError(code) => self.alert(code.as_str()),
			Outcome::TransportFailure => debug!(post, "reply not confirmed"),
		}
		Flow::Stop
	}

	/// Inserts a freshly created reply above the compose slot of `post`.
	async fn show_new_reply(&self, post: &str, reply: &str) {
		let fragment = match self.client().get_reply(reply).await {
			Outcome::Success(fragment) => fragment,
			outcome => {
				debug!(reply, ?outcome, "cannot fetch new reply");
				return;
			}
		};
		let confirm_text = self.translation(&self.config().translations.delete_reply_confirm).await;

		self.with_state(|state| {
			let Some(slot) = find_entity(&state.doc, LikeKind::Post, post)
				.and_then(|node| state.doc.select_first(node, &format!(".{COMPOSE_SLOT_CLASS}")))
			else {
				warn!(post, "post of new reply is gone");
				return;
			};
			for node in state.doc.parse_fragment(&fragment.html) {
				if let Err(err) = state.doc.insert_before(slot, node) {
					debug!(reply, %err, "dropping reply markup");
				}
			}
			state.doc.add_class(slot, HIDDEN_CLASS);

			let Some(node) = find_entity(&state.doc, LikeKind::Reply, reply) else {
				debug!(reply, "reply markup carries no matching element");
				return;
			};
			match &confirm_text {
				Some(text) => state.enhance_reply_delete_button(node, text),
				None => debug!(reply, "new reply keeps its plain delete button"),
			}
			state.bind_reply_like_forms(node);
			if state.is_online() {
				state.add_comment_links_in(node);
			}
			trace!(post, reply, "inserted new reply");
		});
	}
}
