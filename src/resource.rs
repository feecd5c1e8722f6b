//! Resource addresses: where the currently viewed resource lives.
//!
//! The remap engine never detects remoteness itself. A [`ResourceResolver`]
//! reports the `(host, user)` pair for a path, and [`RemotePathResolver`]
//! does so for the two remote path notations editors commonly use:
//!
//! - `/method:user@host#port:/local/path` (multi-hop `|` chains use the last hop)
//! - `scheme://user@host:port/local/path`

use std::fmt;

/// The `(host, user)` pair identifying a remote location.
///
/// Both fields absent means a local resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
	pub host: Option<String>,
	pub user: Option<String>,
}

impl ResourceAddress {
	/// A local resource.
	pub fn local() -> Self {
		Self::default()
	}

	/// A remote resource on `host`, optionally accessed as `user`.
	pub fn remote(host: impl Into<String>, user: Option<&str>) -> Self {
		Self {
			host: Some(host.into()),
			user: user.map(str::to_string),
		}
	}

	pub fn is_local(&self) -> bool {
		self.host.is_none() && self.user.is_none()
	}

	pub fn is_remote(&self) -> bool {
		!self.is_local()
	}
}

impl fmt::Display for ResourceAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (&self.user, &self.host) {
			(None, None) => write!(f, "local"),
			(Some(user), Some(host)) => write!(f, "{}@{}", user, host),
			(None, Some(host)) => write!(f, "{}", host),
			(Some(user), None) => write!(f, "{}@", user),
		}
	}
}

/// Maps the active resource path to its address.
pub trait ResourceResolver {
	fn resolve(&self, path: &str) -> ResourceAddress;
}

/// Resolver for remote path notations. Anything unrecognized is local.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemotePathResolver;

impl ResourceResolver for RemotePathResolver {
	fn resolve(&self, path: &str) -> ResourceAddress {
		parse_url_path(path)
			.or_else(|| parse_method_path(path))
			.unwrap_or_default()
	}
}

/// Parse `/method:user@host#port:/path`, using the last hop of a `|` chain.
fn parse_method_path(path: &str) -> Option<ResourceAddress> {
	let mut rest = path.strip_prefix('/')?;
	loop {
		let (method, tail) = rest.split_once(':')?;
		if method.is_empty() || !method.chars().all(is_method_char) {
			return None;
		}
		let end = authority_end(tail)?;
		// After the last hop's `:` comes the local path, which may contain `|`.
		if tail[end..].starts_with('|') {
			rest = &tail[end + 1..];
		} else {
			return Some(parse_authority(&tail[..end], '#'));
		}
	}
}

/// Offset of the `|` or `:` closing a hop's authority. Bracketed hosts may contain `:`.
fn authority_end(tail: &str) -> Option<usize> {
	let mut bracketed = false;
	for (i, c) in tail.char_indices() {
		match c {
			'[' => bracketed = true,
			']' => bracketed = false,
			'|' | ':' if !bracketed => return Some(i),
			_ => {}
		}
	}
	None
}

/// Parse `scheme://user@host:port/path`. `file://` URLs are local.
fn parse_url_path(path: &str) -> Option<ResourceAddress> {
	let (scheme, rest) = path.split_once("://")?;
	if scheme.is_empty() || !scheme.chars().all(is_method_char) {
		return None;
	}
	if scheme.eq_ignore_ascii_case("file") {
		return Some(ResourceAddress::local());
	}

	let authority = rest.split('/').next().unwrap_or("");
	Some(parse_authority(authority, ':'))
}

/// Split `user@host<port_sep>port` into an address, dropping any password and the port.
fn parse_authority(authority: &str, port_sep: char) -> ResourceAddress {
	let (user, host_port) = match authority.rsplit_once('@') {
		// `user:password` keeps only the user
		Some((userinfo, host_port)) => {
			let user = userinfo.split(':').next().unwrap_or(userinfo);
			(non_empty(user), host_port)
		}
		None => (None, authority),
	};

	let host = if let Some(bracketed) = host_port.strip_prefix('[') {
		bracketed.split(']').next().unwrap_or("")
	} else {
		host_port.split(port_sep).next().unwrap_or("")
	};

	ResourceAddress {
		host: non_empty(host),
		user,
	}
}

fn non_empty(s: &str) -> Option<String> {
	(!s.is_empty()).then(|| s.to_string())
}

fn is_method_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+'
}
