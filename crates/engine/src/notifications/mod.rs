//! Notification reconciliation.
//!
//! Every poll hands the server's current notification list and the ids it
//! removed to [`PageState::reconcile`]. Creates and replacements run before
//! removals. Running the same input twice leaves the same set of ids in the
//! notification area, and a notification whose content did not change keeps
//! its node.

use sone_client::{Ack, NotificationData, Outcome, RemovedNotification};
use sone_dom::{Document, HIDDEN_CLASS, NodeId, Transition};
use tracing::{debug, trace, warn};

use crate::binding::Binding;
use crate::event::Flow;
use crate::page::{Page, PageState};

/// Container of all notifications.
const AREA_SELECTOR: &str = "#sone #notification-area";
/// Id of the hidden dismiss form cloned into dismissable notifications.
const DISMISS_TEMPLATE_ID: &str = "notification-dismiss-template";
/// Class of a notification element.
const NOTIFICATION_CLASS: &str = "notification";

/// Ids touched by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
	/// Notifications appended to the area.
	pub created: Vec<String>,
	/// Notifications whose content changed, re-rendered in place.
	pub replaced: Vec<String>,
	/// Notifications taken off the page.
	pub removed: Vec<String>,
}

impl Reconciliation {
	/// Returns true when nothing changed on the page.
	pub fn is_empty(&self) -> bool {
		self.created.is_empty() && self.replaced.is_empty() && self.removed.is_empty()
	}
}

/// Returns the notification elements in `area` carrying `id`.
fn existing(doc: &Document, area: NodeId, id: &str) -> Vec<NodeId> {
	doc.select(area, &format!(".{NOTIFICATION_CLASS}"))
		.into_iter()
		.filter(|&node| doc.element_id(node) == Some(id))
		.collect()
}

impl PageState {
	/// Applies one poll's notification update to the page.
	pub(crate) fn reconcile(
		&mut self,
		notifications: &[NotificationData],
		removed: &[RemovedNotification],
	) -> Reconciliation {
		let mut result = Reconciliation::default();
		let Some(area) = self.doc.select_first(self.doc.root(), AREA_SELECTOR) else {
			debug!("page has no notification area");
			self.sweep();
			return result;
		};

		for notification in notifications {
			if notification.id.is_empty() || self.dismissed.contains(&notification.id) {
				continue;
			}
			let current = existing(&self.doc, area, &notification.id);
			match current.split_first() {
				Some((&old, duplicates)) => {
					if duplicates.is_empty() && self.shown.get(&notification.id) == Some(notification) {
						continue;
					}
					let rendered = self.render_notification(notification);
					if let Err(err) = self.doc.replace_with(old, rendered) {
						warn!(id = notification.id, %err, "cannot replace notification");
						continue;
					}
					self.doc.show(rendered);
					for &duplicate in duplicates {
						self.doc.detach(duplicate);
					}
					result.replaced.push(notification.id.clone());
				}
				None => {
					let rendered = self.render_notification(notification);
					self.doc.hide(rendered);
					if let Err(err) = self.doc.append_child(area, rendered) {
						warn!(id = notification.id, %err, "cannot append notification");
						continue;
					}
					self.doc.transition(rendered, Transition::SlideDown);
					result.created.push(notification.id.clone());
				}
			}
			self.shown.insert(notification.id.clone(), notification.clone());
		}

		for RemovedNotification { id } in removed {
			self.dismissed.remove(id);
			self.shown.remove(id);
			let nodes = existing(&self.doc, area, id);
			if nodes.is_empty() {
				continue;
			}
			for node in nodes {
				self.doc.transition(node, Transition::SlideUp);
				self.doc.detach(node);
			}
			result.removed.push(id.clone());
		}

		self.sweep();
		trace!(?result, "reconciled notifications");
		result
	}

	/// Builds the detached element for one notification.
	fn render_notification(&mut self, notification: &NotificationData) -> NodeId {
		let node = self.doc.create_element("div");
		self.doc.add_class(node, NOTIFICATION_CLASS);
		self.doc.set_attr(node, "id", notification.id.as_str());

		if notification.dismissable {
			match self
				.doc
				.get_element_by_id(DISMISS_TEMPLATE_ID)
				.and_then(|template| self.doc.clone_subtree(template))
			{
				Some(form) => {
					self.doc.remove_class(form, HIDDEN_CLASS);
					self.doc.remove_attr(form, "id");
					self.doc.show(form);
					for input in self.doc.select(form, "input[name=notification]") {
						self.doc.set_attr(input, "value", notification.id.as_str());
						self.doc.set_value(input, notification.id.as_str());
					}
					if let Err(err) = self.doc.append_child(node, form) {
						debug!(id = notification.id, %err, "cannot attach dismiss form");
					}
					self.bind_dismiss(form);
				}
				None => debug!(id = notification.id, "no dismiss template on the page"),
			}
		}

		for child in self.doc.parse_fragment(&notification.text) {
			if let Err(err) = self.doc.append_child(node, child) {
				debug!(id = notification.id, %err, "dropping notification content");
			}
		}
		node
	}

	/// Wires a dismiss form: its buttons dismiss, its native submit is dropped.
	fn bind_dismiss(&mut self, form: NodeId) {
		self.bindings.bind(form, Binding::SuppressSubmit);
		let buttons = self.doc.select(form, "button");
		self.bind_all(buttons, &Binding::DismissNotification);
	}

	/// Wires the dismiss forms of notifications rendered by the server.
	pub(crate) fn bind_existing_notifications(&mut self) {
		let root = self.doc.root();
		for form in self.doc.select(root, &format!("#sone .{NOTIFICATION_CLASS} form.dismiss")) {
			self.bind_dismiss(form);
		}
	}
}

impl Page {
	/// Dismisses the notification owning `control`.
	///
	/// The notification leaves the page whatever the server answers; its id is
	/// kept out of later polls until the server reports it removed.
	pub(crate) async fn dismiss_notification(&self, control: NodeId) -> Flow {
		let found = self.with_state(|state| {
			let node = state.doc.closest(control, &format!(".{NOTIFICATION_CLASS}"))?;
			let id = state.doc.element_id(node)?.to_owned();
			state.dismissed.insert(id.clone());
			Some((node, id))
		});
		let Some((node, id)) = found else {
			debug!(%control, "dismiss control outside of a notification");
			return Flow::Stop;
		};

		match self.client().dismiss_notification(&id).await {
			Outcome::Success(Ack {}) => trace!(id, "notification dismissed"),
			outcome => debug!(id, ?outcome, "dismiss not confirmed"),
		}
		self.with_state(|state| {
			state.doc.transition(node, Transition::SlideUp);
			state.doc.detach(node);
			state.sweep();
		});
		Flow::Stop
	}
}
