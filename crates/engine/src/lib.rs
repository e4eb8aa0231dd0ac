//! Client-side synchronization engine of the Sone web interface.
//!
//! A [`Page`] owns the server-rendered document and turns user events into
//! ajax calls:
//! * [`Page::enhance`] wires the controls of a freshly loaded page
//! * [`Page::dispatch`] routes one user event to its handler
//! * [`StatusPoller`] keeps Sone widgets and notifications in sync
//!
//! Handlers are pessimistic. The document only changes after the server
//! confirmed a call, and failed calls leave it as it was.

#![warn(missing_docs)]

mod actions;
mod alert;
mod binding;
mod composer;
mod config;
mod delete;
mod event;
mod guard;
pub mod locator;
mod notifications;
mod page;
mod poller;
mod status;
#[cfg(test)]
mod test_support;

pub use actions::SoneAction;
#[cfg(any(test, feature = "test-support"))]
pub use alert::RecordingAlerter;
pub use alert::{Alerter, LogAlerter};
pub use config::{ConfigError, EngineConfig, PollConfig, ReplyConfig, Result, TranslationKeys};
pub use event::{Event, EventKind, Flow};
pub use notifications::Reconciliation;
pub use page::Page;
pub use poller::{Delay, PollHealth, PollResult, StatusPoller, TokioDelay, next_interval};
pub use status::apply_sone_status;
