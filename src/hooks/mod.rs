//! Lifecycle events that trigger a remap pass.
//!
//! The host application owns dispatch. It registers the recomputation entry
//! point ([`Session::dispatch`](crate::session::Session::dispatch)) for every
//! hook in [`RECOMPUTE_HOOKS`].

use std::fmt;
use std::str::FromStr;

/// Lifecycle event of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
	/// A new resource was opened in the view.
	ResourceOpened,
	/// The view's active directory or resource context changed.
	DirectoryChanged,
	/// A directory-listing mode was entered. That mode resets the buffer
	/// label itself, so decoration has to run again afterwards.
	ListingModeEntered,
}

/// Hooks after which decoration must be recomputed.
pub const RECOMPUTE_HOOKS: [LifecycleHook; 3] = [
	LifecycleHook::ResourceOpened,
	LifecycleHook::DirectoryChanged,
	LifecycleHook::ListingModeEntered,
];

impl LifecycleHook {
	pub fn as_str(&self) -> &'static str {
		match self {
			LifecycleHook::ResourceOpened => "resource-opened",
			LifecycleHook::DirectoryChanged => "directory-changed",
			LifecycleHook::ListingModeEntered => "listing-mode-entered",
		}
	}
}

impl fmt::Display for LifecycleHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error for an unrecognized hook name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown lifecycle hook: {0}")]
pub struct UnknownHook(pub String);

impl FromStr for LifecycleHook {
	type Err = UnknownHook;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		RECOMPUTE_HOOKS
			.iter()
			.copied()
			.find(|hook| hook.as_str() == s)
			.ok_or_else(|| UnknownHook(s.to_string()))
	}
}
