//! Tracked Sone widgets and the status poll.

use sone_client::{Outcome, SoneState, SoneStatus, Status};
use sone_dom::{Document, HIDDEN_CLASS};
use tracing::{debug, trace};

use crate::locator::{SONE_CLASS, sanitize_id};
use crate::notifications::Reconciliation;
use crate::page::{Page, PageState};
use crate::poller::PollResult;

/// Overwrites every widget of `sone` with the polled fields.
///
/// Widgets are found by the sanitized id class. Returns the number of
/// widgets updated.
pub fn apply_sone_status(doc: &mut Document, sone: &SoneStatus) -> usize {
	if sone.id.is_empty() {
		return 0;
	}
	let class = sanitize_id(&sone.id);
	let widgets: Vec<_> = doc
		.select(doc.root(), &format!("#sone .{SONE_CLASS}"))
		.into_iter()
		.filter(|&widget| doc.has_class(widget, &class))
		.collect();

	for &widget in &widgets {
		for state in SoneState::ALL {
			doc.toggle_class(widget, state.as_str(), state == sone.status);
		}
		doc.toggle_class(widget, "modified", sone.modified);
		for lock in doc.select(widget, ".lock") {
			doc.toggle_class(lock, HIDDEN_CLASS, sone.locked);
		}
		for unlock in doc.select(widget, ".unlock") {
			doc.toggle_class(unlock, HIDDEN_CLASS, !sone.locked);
		}
		for time in doc.select(widget, ".last-update span.time") {
			doc.set_text(time, sone.last_updated.as_str());
		}
		for link in doc.select(widget, ".profile-link a") {
			doc.set_text(link, sone.name.as_str());
		}
	}
	trace!(sone = sone.id, widgets = widgets.len(), "applied sone status");
	widgets.len()
}

impl PageState {
	/// Applies a successful status poll: Sone widgets first, then
	/// notifications.
	pub(crate) fn apply_status(&mut self, status: &Status) -> Reconciliation {
		for sone in &status.sones {
			apply_sone_status(&mut self.doc, sone);
		}
		self.reconcile(&status.notifications, &status.removed_notifications)
	}
}

impl Page {
	/// Fetches the status once and applies it.
	pub async fn poll_status(&self) -> PollResult {
		match self.client().get_status().await {
			Outcome::Success(status) => {
				let result = self.with_state(|state| state.apply_status(&status));
				debug!(
					sones = status.sones.len(),
					created = result.created.len(),
					removed = result.removed.len(),
					"status applied"
				);
				PollResult::Applied(result)
			}
			Outcome::ServerError(code) => PollResult::LogicalFailure(code),
			Outcome::TransportFailure => PollResult::TransportFailure,
		}
	}
}
