use crate::engine::state::EngineState;
use crate::resource::ResourceAddress;
use crate::rules::RuleTable;
use crate::style::StyleSystem;

/// Recompute the overrides a view carries for `resource`.
///
/// Every previously applied override is released first, so calling this
/// repeatedly with the same inputs leaves the styling system unchanged.
/// Overrides of all matching rules are applied in table order, then rule
/// order. Nothing is deduplicated: when two rules touch the same style, the
/// styling system's stacking lets the later one win per attribute.
pub fn apply_overrides<S: StyleSystem + ?Sized>(
	resource: &ResourceAddress,
	table: &RuleTable,
	state: &mut EngineState,
	styles: &mut S,
) {
	state.release_all(styles);

	if resource.is_local() || !state.enabled() {
		return;
	}

	let host = resource.host.as_deref();
	let user = resource.user.as_deref();
	for rule in table.matching_rules(host, user) {
		for style_override in &rule.rule.overrides {
			match styles.apply_override(&style_override.style, &style_override.attributes) {
				Ok(handle) => state.active_handles.push(handle),
				Err(e) => {
					// One bad override must not blank the rest of the status line
					tracing::warn!(
						style = %style_override.style,
						error = %e,
						"Skipping style override"
					);
				}
			}
		}
	}

	tracing::debug!(
		%resource,
		active = state.active_handles.len(),
		"Applied style overrides"
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Rule, StyleOverride};
	use crate::engine::state::LabelFn;
	use crate::engine::text::StyledText;
	use crate::style::{Attributes, StyleRegistry, ViewStyles};
	use std::sync::Arc;

	fn enabled_state() -> EngineState {
		let label: LabelFn = Arc::new(|_: &ResourceAddress| StyledText::plain("buf"));
		let mut state = EngineState::new(Arc::clone(&label), label);
		state.enable();
		state
	}

	fn background(host: &str, color: &str) -> Rule {
		Rule {
			host_pattern: Some(host.to_string()),
			user_pattern: None,
			overrides: vec![StyleOverride {
				style: "background".to_string(),
				attributes: Attributes {
					background: Some(color.to_string()),
					..Default::default()
				},
			}],
		}
	}

	fn styles() -> ViewStyles {
		ViewStyles::new(Arc::new(StyleRegistry::with_defaults()))
	}

	#[test]
	fn test_local_resource_gets_no_overrides() {
		let table = RuleTable::compile(&[Rule::default()]).unwrap();
		let mut state = enabled_state();
		let mut styles = styles();

		apply_overrides(&ResourceAddress::local(), &table, &mut state, &mut styles);
		assert!(state.active_handles().is_empty());
		assert_eq!(styles.active_count(), 0);
	}

	#[test]
	fn test_disabled_state_gets_no_overrides() {
		let table = RuleTable::compile(&[Rule::default()]).unwrap();
		let label: LabelFn = Arc::new(|_: &ResourceAddress| StyledText::new());
		let mut state = EngineState::new(Arc::clone(&label), label);
		let mut styles = styles();

		apply_overrides(
			&ResourceAddress::remote("foo", None),
			&table,
			&mut state,
			&mut styles,
		);
		assert_eq!(styles.active_count(), 0);
	}

	#[test]
	fn test_later_rule_wins_on_same_style() {
		let table =
			RuleTable::compile(&[background("^foo$", "Red"), background("^f", "Blue")]).unwrap();
		let mut state = enabled_state();
		let mut styles = styles();

		apply_overrides(
			&ResourceAddress::remote("foo", None),
			&table,
			&mut state,
			&mut styles,
		);
		assert_eq!(state.active_handles().len(), 2);
		assert_eq!(
			styles.resolve("background").unwrap().background.as_deref(),
			Some("Blue")
		);
	}

	#[test]
	fn test_unknown_style_is_skipped() {
		let mut rule = background("^foo$", "Red");
		rule.overrides.insert(
			0,
			StyleOverride {
				style: "no-such-style".to_string(),
				..Default::default()
			},
		);
		let table = RuleTable::compile(&[rule]).unwrap();
		let mut state = enabled_state();
		let mut styles = styles();

		apply_overrides(
			&ResourceAddress::remote("foo", None),
			&table,
			&mut state,
			&mut styles,
		);
		assert_eq!(state.active_handles().len(), 1);
		assert_eq!(
			styles.resolve("background").unwrap().background.as_deref(),
			Some("Red")
		);
	}

	#[test]
	fn test_recompute_is_idempotent() {
		let table = RuleTable::compile(&[background("^foo$", "Red")]).unwrap();
		let mut state = enabled_state();
		let mut styles = styles();
		let resource = ResourceAddress::remote("foo", Some("bar"));

		apply_overrides(&resource, &table, &mut state, &mut styles);
		let first = styles.resolve("background");
		apply_overrides(&resource, &table, &mut state, &mut styles);

		assert_eq!(state.active_handles().len(), 1);
		assert_eq!(styles.active_count(), 1);
		assert_eq!(styles.resolve("background"), first);
	}

	#[test]
	fn test_switching_to_unmatched_host_clears() {
		let table = RuleTable::compile(&[background("^foo$", "Red")]).unwrap();
		let mut state = enabled_state();
		let mut styles = styles();

		apply_overrides(
			&ResourceAddress::remote("foo", Some("bar")),
			&table,
			&mut state,
			&mut styles,
		);
		apply_overrides(
			&ResourceAddress::remote("baz", Some("bar")),
			&table,
			&mut state,
			&mut styles,
		);
		assert!(state.active_handles().is_empty());
		assert_eq!(styles.active_count(), 0);
	}
}
