//! Success payloads of the ajax endpoints.
//!
//! Only the fields the page uses are decoded; everything else in a response
//! is ignored. Missing collections decode as empty.

use serde::Deserialize;

/// Payload of calls that answer nothing beyond `success`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}

/// `getTranslation` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
	/// The translated text.
	pub value: String,
}

/// `getLikes` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Likes {
	/// Number of likes.
	pub likes: u32,
	/// Liking Sones, in server order.
	#[serde(default)]
	pub sones: Vec<LikingSone>,
}

impl Likes {
	/// Display names joined one per line, as shown in the hover title.
	pub fn names(&self) -> String {
		self.sones.iter().map(|sone| sone.name.as_str()).collect::<Vec<_>>().join("\n")
	}
}

/// One Sone listed by `getLikes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikingSone {
	/// Display name.
	pub name: String,
}

/// `createReply` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedReply {
	/// Id the server assigned to the reply.
	pub reply: String,
}

/// `getReply` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyFragment {
	/// Author id.
	#[serde(default)]
	pub sone_id: String,
	/// Author display name.
	#[serde(default)]
	pub sone_name: String,
	/// Creation time in milliseconds since the epoch.
	#[serde(default)]
	pub time: u64,
	/// Human-readable creation time.
	#[serde(default)]
	pub display_time: String,
	/// Raw reply text.
	#[serde(default)]
	pub text: String,
	/// Rendered reply markup.
	pub html: String,
}

/// `getStatus` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
	/// Current state of every known Sone.
	#[serde(default)]
	pub sones: Vec<SoneStatus>,
	/// Active notifications.
	#[serde(default)]
	pub notifications: Vec<NotificationData>,
	/// Notifications that went away since the last poll.
	#[serde(default)]
	pub removed_notifications: Vec<RemovedNotification>,
}

/// Server view of one Sone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoneStatus {
	/// Sone id.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Network activity.
	#[serde(default)]
	pub status: SoneState,
	/// The local Sone has unsaved changes.
	#[serde(default)]
	pub modified: bool,
	/// The local Sone is locked against insertion.
	#[serde(default)]
	pub locked: bool,
	/// Human-readable time of the last update.
	#[serde(default)]
	pub last_updated: String,
}

/// Network activity of a Sone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SoneState {
	/// Not yet seen on the network.
	#[default]
	Unknown,
	/// Nothing in progress.
	Idle,
	/// Being inserted.
	Inserting,
	/// Being downloaded.
	Downloading,
}

impl SoneState {
	/// Every state.
	pub const ALL: [Self; 4] = [Self::Unknown, Self::Idle, Self::Inserting, Self::Downloading];

	/// Returns the wire name, which doubles as the CSS class.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "unknown",
			Self::Idle => "idle",
			Self::Inserting => "inserting",
			Self::Downloading => "downloading",
		}
	}
}

impl From<String> for SoneState {
	fn from(value: String) -> Self {
		match value.as_str() {
			"idle" => Self::Idle,
			"inserting" => Self::Inserting,
			"downloading" => Self::Downloading,
			_ => Self::Unknown,
		}
	}
}

/// One active notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationData {
	/// Notification id.
	pub id: String,
	/// Rendered notification markup.
	#[serde(default)]
	pub text: String,
	/// The viewer may dismiss it.
	#[serde(default)]
	pub dismissable: bool,
}

/// Id of a notification that went away.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemovedNotification {
	/// Notification id.
	pub id: String,
}
