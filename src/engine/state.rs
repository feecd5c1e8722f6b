use crate::engine::text::StyledText;
use crate::resource::ResourceAddress;
use crate::style::{OverrideHandle, StyleSystem};
use std::sync::Arc;

/// A label source: computes label markup for the current resource.
pub type LabelFn = Arc<dyn Fn(&ResourceAddress) -> StyledText + Send + Sync>;

/// Which strategy a view uses for one of its status-line slots.
#[derive(Clone)]
pub enum LabelProvider {
	/// Remapping is off; the host's own provider is in charge.
	Baseline(LabelFn),

	/// Remapping is on; `baseline` is the provider captured when it was enabled.
	Remapping { baseline: LabelFn },
}

impl LabelProvider {
	/// The host's provider, whichever strategy is active.
	pub fn baseline(&self) -> &LabelFn {
		match self {
			LabelProvider::Baseline(baseline) | LabelProvider::Remapping { baseline } => baseline,
		}
	}

	pub fn is_remapping(&self) -> bool {
		matches!(self, LabelProvider::Remapping { .. })
	}

	fn capture(&mut self) {
		if let LabelProvider::Baseline(baseline) = self {
			*self = LabelProvider::Remapping {
				baseline: Arc::clone(baseline),
			};
		}
	}

	fn restore(&mut self) {
		if let LabelProvider::Remapping { baseline } = self {
			*self = LabelProvider::Baseline(Arc::clone(baseline));
		}
	}
}

impl std::fmt::Debug for LabelProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LabelProvider::Baseline(_) => write!(f, "Baseline"),
			LabelProvider::Remapping { .. } => write!(f, "Remapping"),
		}
	}
}

/// Remapping state owned by one view.
#[derive(Debug)]
pub struct EngineState {
	pub(crate) active_handles: Vec<OverrideHandle>,
	buffer_label: LabelProvider,
	remote_indicator: LabelProvider,
}

impl EngineState {
	/// New, disabled state around the view's own label providers.
	pub fn new(buffer_label: LabelFn, remote_indicator: LabelFn) -> Self {
		Self {
			active_handles: Vec::new(),
			buffer_label: LabelProvider::Baseline(buffer_label),
			remote_indicator: LabelProvider::Baseline(remote_indicator),
		}
	}

	pub fn enabled(&self) -> bool {
		self.buffer_label.is_remapping()
	}

	/// Switch to the remapping providers, capturing the baselines.
	///
	/// Returns `false` if already enabled; the baselines are captured once.
	pub fn enable(&mut self) -> bool {
		if self.enabled() {
			return false;
		}
		self.buffer_label.capture();
		self.remote_indicator.capture();
		tracing::debug!("Remapping enabled for view");
		true
	}

	/// Restore the captured baselines and drop every active override.
	///
	/// Returns `false` if already disabled.
	pub fn disable<S: StyleSystem + ?Sized>(&mut self, styles: &mut S) -> bool {
		if !self.enabled() {
			return false;
		}
		self.release_all(styles);
		self.buffer_label.restore();
		self.remote_indicator.restore();
		tracing::debug!("Remapping disabled for view");
		true
	}

	pub fn buffer_label(&self) -> &LabelProvider {
		&self.buffer_label
	}

	pub fn remote_indicator(&self) -> &LabelProvider {
		&self.remote_indicator
	}

	/// Handles of the overrides currently applied for this view.
	pub fn active_handles(&self) -> &[OverrideHandle] {
		&self.active_handles
	}

	/// Release every active handle. Already-released handles are ignored.
	pub(crate) fn release_all<S: StyleSystem + ?Sized>(&mut self, styles: &mut S) {
		for handle in self.active_handles.drain(..) {
			if !styles.release_override(handle) {
				tracing::trace!(?handle, "Override handle was already released");
			}
		}
	}
}
