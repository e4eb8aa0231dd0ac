use std::fmt;

/// The ajax endpoints the page talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Resolve a translation key.
	GetTranslation,
	/// Delete one of the viewer's posts.
	DeletePost,
	/// Delete one of the viewer's replies.
	DeleteReply,
	/// Like a post or reply.
	Like,
	/// Withdraw a like.
	Unlike,
	/// Count the likes of a post or reply.
	GetLikes,
	/// Reply to a post.
	CreateReply,
	/// Fetch the rendered markup of a reply.
	GetReply,
	/// Dismiss a notification.
	DismissNotification,
	/// Fetch Sone states and notification changes.
	GetStatus,
	/// Follow a Sone.
	FollowSone,
	/// Stop following a Sone.
	UnfollowSone,
	/// Lock a local Sone against insertion.
	LockSone,
	/// Unlock a local Sone.
	UnlockSone,
}

impl Endpoint {
	/// Every endpoint.
	pub const ALL: [Self; 14] = [
		Self::GetTranslation,
		Self::DeletePost,
		Self::DeleteReply,
		Self::Like,
		Self::Unlike,
		Self::GetLikes,
		Self::CreateReply,
		Self::GetReply,
		Self::DismissNotification,
		Self::GetStatus,
		Self::FollowSone,
		Self::UnfollowSone,
		Self::LockSone,
		Self::UnlockSone,
	];

	/// Returns the page name of the endpoint.
	pub const fn name(self) -> &'static str {
		match self {
			Self::GetTranslation => "getTranslation",
			Self::DeletePost => "deletePost",
			Self::DeleteReply => "deleteReply",
			Self::Like => "like",
			Self::Unlike => "unlike",
			Self::GetLikes => "getLikes",
			Self::CreateReply => "createReply",
			Self::GetReply => "getReply",
			Self::DismissNotification => "dismissNotification",
			Self::GetStatus => "getStatus",
			Self::FollowSone => "followSone",
			Self::UnfollowSone => "unfollowSone",
			Self::LockSone => "lockSone",
			Self::UnlockSone => "unlockSone",
		}
	}

	/// Returns the request path relative to the web interface root.
	pub fn path(self) -> String {
		format!("ajax/{}.ajax", self.name())
	}

	/// Returns true for endpoints that change server state and so need the
	/// form password.
	pub const fn is_mutating(self) -> bool {
		!matches!(
			self,
			Self::GetTranslation | Self::GetLikes | Self::GetReply | Self::GetStatus
		)
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
