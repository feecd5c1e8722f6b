//! Views of an editing session and their remapping state.
//!
//! Each view owns its [`EngineState`] and its override stack, so nothing
//! leaks between views. The rule table and the feature toggle are shared.

use crate::config::Config;
use crate::engine::{Decoration, EngineState, LabelFn, decorate};
use crate::error::Result;
use crate::hooks::LifecycleHook;
use crate::resource::{RemotePathResolver, ResourceAddress, ResourceResolver};
use crate::rules::RuleTable;
use crate::style::{StyleRegistry, ViewStyles};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier of a view within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// A decorated view.
#[derive(Debug)]
pub struct View {
	path: String,
	address: ResourceAddress,
	styles: ViewStyles,
	state: EngineState,
}

impl View {
	/// Path of the resource currently shown.
	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn address(&self) -> &ResourceAddress {
		&self.address
	}

	/// The view's styles with its active overrides.
	pub fn styles(&self) -> &ViewStyles {
		&self.styles
	}

	pub fn state(&self) -> &EngineState {
		&self.state
	}
}

/// All decorated views of one editing session.
#[derive(Debug)]
pub struct Session<R: ResourceResolver = RemotePathResolver> {
	registry: Arc<StyleRegistry>,
	rules: RuleTable,
	enabled: bool,
	resolver: R,
	views: HashMap<ViewId, View>,
}

impl Session<RemotePathResolver> {
	/// Build a session from a config, compiling its rules.
	pub fn from_config(config: &Config) -> Result<Self> {
		let registry = config.build_registry();
		let rules = RuleTable::compile(&config.effective_rules(&registry))?;
		let mut session = Session::new(registry, rules, RemotePathResolver);
		session.enabled = config.enabled;
		Ok(session)
	}
}

impl<R: ResourceResolver> Session<R> {
	/// New, enabled session.
	pub fn new(registry: StyleRegistry, rules: RuleTable, resolver: R) -> Self {
		Self {
			registry: Arc::new(registry),
			rules,
			enabled: true,
			resolver,
			views: HashMap::new(),
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn rules(&self) -> &RuleTable {
		&self.rules
	}

	pub fn view(&self, id: ViewId) -> Option<&View> {
		self.views.get(&id)
	}

	pub fn view_count(&self) -> usize {
		self.views.len()
	}

	/// Start decorating a view showing `path`.
	///
	/// `buffer_label` and `remote_indicator` are the view's own providers;
	/// they become the baselines. Opening an already decorated view replaces
	/// it.
	pub fn open_view(
		&mut self,
		id: ViewId,
		path: &str,
		buffer_label: LabelFn,
		remote_indicator: LabelFn,
	) -> Decoration {
		self.close_view(id);

		let mut state = EngineState::new(buffer_label, remote_indicator);
		if self.enabled {
			state.enable();
		}
		let mut view = View {
			path: path.to_string(),
			address: self.resolver.resolve(path),
			styles: ViewStyles::new(Arc::clone(&self.registry)),
			state,
		};
		let decoration = redecorate(id, &mut view, &self.rules, LifecycleHook::ResourceOpened);
		self.views.insert(id, view);
		decoration
	}

	/// Stop decorating a view, releasing its overrides.
	pub fn close_view(&mut self, id: ViewId) -> bool {
		match self.views.remove(&id) {
			Some(mut view) => {
				view.state.disable(&mut view.styles);
				true
			}
			None => false,
		}
	}

	/// Entry point for lifecycle hooks.
	///
	/// Updates the view's resource to `path` and recomputes its decoration.
	/// Returns `None` for a view that was never opened.
	pub fn dispatch(&mut self, id: ViewId, hook: LifecycleHook, path: &str) -> Option<Decoration> {
		let address = self.resolver.resolve(path);
		let view = self.views.get_mut(&id)?;
		view.path = path.to_string();
		view.address = address;
		Some(redecorate(id, view, &self.rules, hook))
	}

	/// Recompute a view's decoration for its current resource.
	pub fn refresh(&mut self, id: ViewId) -> Option<Decoration> {
		let view = self.views.get_mut(&id)?;
		Some(redecorate(id, view, &self.rules, LifecycleHook::DirectoryChanged))
	}

	/// Turn remapping on or off for every view.
	///
	/// Enabling twice or disabling twice has no further effect.
	pub fn set_enabled(&mut self, enabled: bool) {
		if self.enabled == enabled {
			return;
		}
		self.enabled = enabled;
		tracing::info!(enabled, views = self.views.len(), "Toggled style remapping");

		for view in self.views.values_mut() {
			if enabled {
				view.state.enable();
			} else {
				view.state.disable(&mut view.styles);
			}
		}
		self.refresh_all();
	}

	/// Swap in a new rule table and redecorate every view.
	pub fn reload_rules(&mut self, rules: RuleTable) {
		tracing::info!(rules = rules.len(), "Reloaded remap rules");
		self.rules = rules;
		self.refresh_all();
	}

	fn refresh_all(&mut self) {
		let ids: Vec<ViewId> = self.views.keys().copied().collect();
		for id in ids {
			self.refresh(id);
		}
	}
}

fn redecorate(id: ViewId, view: &mut View, rules: &RuleTable, hook: LifecycleHook) -> Decoration {
	tracing::debug!(view = id.0, %hook, path = %view.path, "Recomputing decoration");
	decorate(&view.address, rules, &mut view.state, &mut view.styles)
}
