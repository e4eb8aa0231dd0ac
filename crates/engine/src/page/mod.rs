//! The enhanced page: document, bindings and the services handlers share.
//!
//! [`Page`] is a cheap handle; clones share one document. Handlers run on the
//! caller's task and only suspend on network calls. The document lock is
//! taken in short synchronous sections between those calls and never held
//! across an `.await`, so events that arrive while a call is pending are
//! dispatched against the current document.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use sone_client::{ActionClient, FormPassword, NotificationData, Transport, Translations};
use sone_dom::{Document, NodeId, TransitionRecord};
use tracing::{debug, info, warn};

use crate::alert::Alerter;
use crate::binding::{Binding, Bindings};
use crate::config::EngineConfig;
use crate::event::{Event, EventKind, Flow};
use crate::guard::GuardSlot;

/// Selector of the element carrying the page's form password.
const FORM_PASSWORD_SELECTOR: &str = "#sone #formPassword";

/// Mutable page state behind the page lock.
#[derive(Debug, Default)]
pub(crate) struct PageState {
	pub(crate) doc: Document,
	pub(crate) bindings: Bindings,
	pub(crate) guard: GuardSlot,
	/// Notifications dismissed locally that the server still reports.
	pub(crate) dismissed: HashSet<String>,
	/// Content each notification on the page was last rendered from.
	pub(crate) shown: HashMap<String, NotificationData>,
}

impl PageState {
	pub(crate) fn new(doc: Document) -> Self {
		Self {
			doc,
			..Self::default()
		}
	}

	/// Forgets nodes taken off the page: their bindings go and their storage
	/// is reclaimed.
	pub(crate) fn sweep(&mut self) {
		self.bindings.prune(&self.doc);
		self.doc.reclaim_detached();
	}

	/// Attaches `binding` to every node in `nodes`.
	pub(crate) fn bind_all(&mut self, nodes: impl IntoIterator<Item = NodeId>, binding: &Binding) -> usize {
		nodes
			.into_iter()
			.filter(|&node| self.bindings.bind(node, binding.clone()))
			.count()
	}
}

struct Inner {
	client: ActionClient,
	translations: Arc<Translations>,
	alerter: Arc<dyn Alerter>,
	config: EngineConfig,
	state: Mutex<PageState>,
}

/// Handle to an enhanced page.
#[derive(Clone)]
pub struct Page {
	inner: Arc<Inner>,
}

impl Page {
	/// Wraps `doc`, sending calls through `transport`.
	///
	/// The form password comes from the configuration or, failing that,
	/// from the page itself.
	pub fn new(doc: Document, transport: Arc<dyn Transport>, alerter: Arc<dyn Alerter>, config: EngineConfig) -> Self {
		let password = match &config.form_password {
			Some(password) => password.clone(),
			None => embedded_form_password(&doc).unwrap_or_default(),
		};
		if password.is_empty() {
			warn!("page carries no form password; state-changing calls will be refused");
		}
		let client = ActionClient::new(transport, FormPassword::new(password));
		let translations = Arc::new(Translations::new(client.clone()));
		Self::with_parts(doc, client, translations, alerter, config)
	}

	/// Wraps `doc` with explicitly provided services.
	pub fn with_parts(
		doc: Document,
		client: ActionClient,
		translations: Arc<Translations>,
		alerter: Arc<dyn Alerter>,
		config: EngineConfig,
	) -> Self {
		Self {
			inner: Arc::new(Inner {
				client,
				translations,
				alerter,
				config,
				state: Mutex::new(PageState::new(doc)),
			}),
		}
	}

	/// Returns the action client.
	pub fn client(&self) -> &ActionClient {
		&self.inner.client
	}

	/// Returns the translation cache.
	pub fn translations(&self) -> &Translations {
		&self.inner.translations
	}

	/// Returns the engine configuration.
	pub fn config(&self) -> &EngineConfig {
		&self.inner.config
	}

	/// Runs `f` with the document.
	pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
		f(&self.inner.state.lock().doc)
	}

	/// Runs `f` with the document, mutably.
	pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
		f(&mut self.inner.state.lock().doc)
	}

	/// Drains the visibility transitions applied since the last call.
	pub fn take_transitions(&self) -> Vec<TransitionRecord> {
		self.with_document_mut(Document::take_transitions)
	}

	/// Returns true while a delete confirmation waits for its outside click.
	pub fn confirmation_pending(&self) -> bool {
		self.inner.state.lock().guard.active().is_some()
	}

	pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
		f(&mut self.inner.state.lock())
	}

	pub(crate) fn alert(&self, message: &str) {
		self.inner.alerter.alert(message);
	}

	/// Resolves a translation, logging when it is unavailable.
	pub(crate) async fn translation(&self, key: &str) -> Option<String> {
		let text = self.inner.translations.resolve(key).await;
		if text.is_none() {
			warn!(key, "translation unavailable");
		}
		text
	}

	/// Wires every control of the loaded page.
	///
	/// Steps needing a translation are skipped when it cannot be resolved.
	pub async fn enhance(&self) {
		let keys = self.config().translations.clone();

		match self.translation(&keys.status_update_placeholder).await {
			Some(text) => {
				self.with_state(|state| state.register_input_swap("#sone #update-status .status-input", &text));
			}
			None => debug!("skipping status update input"),
		}

		match self.translation(&keys.reply_placeholder).await {
			Some(text) => self.with_state(|state| {
				state.register_input_swap("#sone input.reply-input", &text);
				state.add_comment_links();
			}),
			None => debug!("skipping reply inputs and comment links"),
		}

		self.with_state(PageState::bind_reply_submits);

		let delete_texts = match self.translation(&keys.delete_post_confirm).await {
			Some(post) => self.translation(&keys.delete_reply_confirm).await.map(|reply| (post, reply)),
			None => None,
		};
		match delete_texts {
			Some((post, reply)) => self.with_state(|state| state.enhance_delete_buttons(&post, &reply)),
			None => debug!("skipping delete buttons"),
		}

		match self.translation(&keys.click_to_show_replies).await {
			Some(text) => {
				let visible = self.config().replies.visible_replies;
				self.with_state(|state| state.truncate_replies(&text, visible));
			}
			None => debug!("skipping reply truncation"),
		}

		let bound = self.with_state(|state| {
			state.bind_sone_toggles();
			state.bind_like_forms();
			state.bind_existing_notifications();
			state.bindings.len()
		});
		info!(bound, "page enhanced");
	}

	/// Routes `event` to the binding it reaches.
	///
	/// A click that no click-consuming binding handles first fires the
	/// pending outside-click guard, if any.
	pub async fn dispatch(&self, event: Event) -> Flow {
		let resolved = self.with_state(|state| {
			match event.kind {
				EventKind::Focus => {
					state.doc.focus(event.target);
				}
				EventKind::Blur => {
					if state.doc.focused() == Some(event.target) {
						state.doc.blur();
					}
				}
				EventKind::Click | EventKind::Submit => {}
			}
			let resolved = state.bindings.resolve(&state.doc, event.kind, event.target);
			let consumed = resolved.as_ref().is_some_and(|(_, binding)| binding.consumes_click());
			if event.kind == EventKind::Click && !consumed && state.guard.fire(&mut state.doc) {
				debug!(clicked = %event.target, "outside click reverted delete confirmation");
			}
			resolved
		});
		let Some((node, binding)) = resolved else {
			return Flow::Continue;
		};
		debug!(?event, %node, ?binding, "dispatching");
		self.run(node, binding).await
	}

	async fn run(&self, node: NodeId, binding: Binding) -> Flow {
		match binding {
			Binding::Like(kind) => self.toggle_like(node, kind, true).await,
			Binding::Unlike(kind) => self.toggle_like(node, kind, false).await,
			Binding::SoneToggle(action) => self.toggle_sone(node, action).await,
			Binding::DeleteButton { confirm, .. } => self.arm_delete(node, confirm),
			Binding::ConfirmDelete { target, button } => self.confirm_delete(node, target, button).await,
			Binding::CollapsedInput { expanded } => {
				self.with_state(|state| state.expand_input(node, expanded));
				Flow::Continue
			}
			Binding::ExpandedInput { collapsed, placeholder } => {
				self.with_state(|state| state.collapse_input(node, collapsed, &placeholder));
				Flow::Continue
			}
			Binding::GuardedForm { field } => {
				if self.with_document(|doc| doc.value(field).is_empty()) {
					debug!(form = %node, "suppressing submission of empty form");
					Flow::Stop
				} else {
					Flow::Continue
				}
			}
			Binding::SubmitReply => self.submit_reply(node).await,
			Binding::ShowReplyForm => {
				self.with_state(|state| state.reveal_reply_form(node));
				Flow::Stop
			}
			Binding::ClickToShow => {
				self.with_state(|state| state.reveal_replies(node));
				Flow::Stop
			}
			Binding::DismissNotification => self.dismiss_notification(node).await,
			Binding::SuppressSubmit => Flow::Stop,
		}
	}
}

/// Reads the form password embedded in the page.
fn embedded_form_password(doc: &Document) -> Option<String> {
	let node = doc.select_first(doc.root(), FORM_PASSWORD_SELECTOR)?;
	Some(doc.text(node).trim().to_owned())
}

#[cfg(test)]
mod tests;
