use crate::engine::apply::apply_overrides;
use crate::engine::state::EngineState;
use crate::engine::text::{Span, StyledText};
use crate::resource::ResourceAddress;
use crate::rules::RuleTable;
use crate::style::{PRIMARY_LABEL_STYLE, REMOTE_INDICATOR_STYLE, StyleSystem};

/// Label and indicator markup for one view after a recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	pub label: StyledText,
	pub indicator: StyledText,
}

/// Short display form of a host name.
///
/// Drops everything from the first `.` on, unless the host starts with a
/// digit (IP addresses are shown in full).
pub fn short_host(host: &str) -> &str {
	if host.starts_with(|c: char| c.is_ascii_digit()) {
		return host;
	}
	host.split('.').next().unwrap_or(host)
}

/// Whether any rule matching `resource` remaps `style`.
fn style_requested(resource: &ResourceAddress, table: &RuleTable, style: &str) -> bool {
	table
		.matching_rules(resource.host.as_deref(), resource.user.as_deref())
		.any(|rule| rule.rule.targets(style))
}

/// Buffer identification label for `resource`.
///
/// With remapping enabled and a matching rule remapping the label style, the
/// short host name is prepended to the baseline label in that style.
/// Otherwise the baseline label is returned untouched.
pub fn derive_buffer_label<S: StyleSystem + ?Sized>(
	resource: &ResourceAddress,
	table: &RuleTable,
	state: &mut EngineState,
	styles: &mut S,
) -> StyledText {
	apply_overrides(resource, table, state, styles);

	let baseline = (state.buffer_label().baseline())(resource);
	if !state.enabled() || resource.is_local() {
		return baseline;
	}

	match resource.host.as_deref() {
		Some(host) if style_requested(resource, table, PRIMARY_LABEL_STYLE) => {
			let prefix = Span::styled(format!("{}: ", short_host(host)), PRIMARY_LABEL_STYLE);
			baseline.prefixed(prefix)
		}
		_ => baseline,
	}
}

/// Remote indicator for `resource`.
///
/// With remapping enabled and a matching rule remapping the indicator style,
/// the baseline indicator's text is redrawn in that style. Other text
/// properties are kept.
pub fn derive_remote_indicator<S: StyleSystem + ?Sized>(
	resource: &ResourceAddress,
	table: &RuleTable,
	state: &mut EngineState,
	styles: &mut S,
) -> StyledText {
	apply_overrides(resource, table, state, styles);

	let baseline = (state.remote_indicator().baseline())(resource);
	if state.enabled()
		&& resource.is_remote()
		&& style_requested(resource, table, REMOTE_INDICATOR_STYLE)
	{
		baseline.restyled(REMOTE_INDICATOR_STYLE)
	} else {
		baseline
	}
}

/// Recompute overrides and derive both the label and the indicator.
pub fn decorate<S: StyleSystem + ?Sized>(
	resource: &ResourceAddress,
	table: &RuleTable,
	state: &mut EngineState,
	styles: &mut S,
) -> Decoration {
	let label = derive_buffer_label(resource, table, state, styles);
	let indicator = derive_remote_indicator(resource, table, state, styles);
	Decoration { label, indicator }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Rule, StyleOverride};
	use crate::engine::state::LabelFn;
	use crate::style::{Attributes, StyleRegistry, ViewStyles};
	use std::sync::Arc;

	fn state() -> EngineState {
		let label: LabelFn = Arc::new(|_: &ResourceAddress| StyledText::plain("notes.txt"));
		let indicator: LabelFn = Arc::new(|address: &ResourceAddress| {
			let text = if address.is_remote() { "@" } else { "-" };
			StyledText::from(Span::plain(text).with_property("help", "location"))
		});
		EngineState::new(label, indicator)
	}

	fn styles() -> ViewStyles {
		ViewStyles::new(Arc::new(StyleRegistry::with_defaults()))
	}

	fn targeting(user: &str, style: &str) -> Rule {
		Rule {
			host_pattern: None,
			user_pattern: Some(user.to_string()),
			overrides: vec![StyleOverride {
				style: style.to_string(),
				attributes: Attributes {
					bold: Some(true),
					..Default::default()
				},
			}],
		}
	}

	#[test]
	fn test_short_host() {
		assert_eq!(short_host("myhost.example.com"), "myhost");
		assert_eq!(short_host("10.0.0.5"), "10.0.0.5");
		assert_eq!(short_host("plainhost"), "plainhost");
		assert_eq!(short_host(""), "");
	}

	#[test]
	fn test_label_prefixed_when_requested() {
		let table = RuleTable::compile(&[targeting("^root$", PRIMARY_LABEL_STYLE)]).unwrap();
		let mut state = state();
		let mut styles = styles();
		state.enable();

		let resource = ResourceAddress::remote("web.example.com", Some("root"));
		let label = derive_buffer_label(&resource, &table, &mut state, &mut styles);

		assert_eq!(label.to_string(), "web: notes.txt");
		assert_eq!(
			label.spans()[0].style.as_deref(),
			Some(PRIMARY_LABEL_STYLE)
		);
		assert!(label.spans()[1].style.is_none());
	}

	#[test]
	fn test_label_gate_is_any_matching_rule() {
		let table = RuleTable::compile(&[
			targeting("^root$", "background"),
			targeting(".*", PRIMARY_LABEL_STYLE),
			targeting("^nobody$", "background"),
		])
		.unwrap();
		let mut state = state();
		let mut styles = styles();
		state.enable();

		let resource = ResourceAddress::remote("10.0.0.5", Some("root"));
		let label = derive_buffer_label(&resource, &table, &mut state, &mut styles);
		assert_eq!(label.to_string(), "10.0.0.5: notes.txt");
		assert_eq!(state.active_handles().len(), 2);
	}

	#[test]
	fn test_label_untouched_without_requesting_rule() {
		let table = RuleTable::compile(&[targeting(".*", "background")]).unwrap();
		let mut state = state();
		let mut styles = styles();
		state.enable();

		let resource = ResourceAddress::remote("web", Some("root"));
		let label = derive_buffer_label(&resource, &table, &mut state, &mut styles);
		assert_eq!(label, StyledText::plain("notes.txt"));
	}

	#[test]
	fn test_disabled_passthrough() {
		let table = RuleTable::compile(&[targeting(".*", PRIMARY_LABEL_STYLE)]).unwrap();
		let mut state = state();
		let mut styles = styles();

		let resource = ResourceAddress::remote("web", Some("root"));
		let decoration = decorate(&resource, &table, &mut state, &mut styles);
		assert_eq!(decoration.label, StyledText::plain("notes.txt"));
		assert_eq!(decoration.indicator.text(), "@");
		assert!(decoration.indicator.spans()[0].style.is_none());
		assert_eq!(styles.active_count(), 0);
	}

	#[test]
	fn test_indicator_restyled_keeps_properties() {
		let table = RuleTable::compile(&[targeting("^admin$", REMOTE_INDICATOR_STYLE)]).unwrap();
		let mut state = state();
		let mut styles = styles();
		state.enable();

		let resource = ResourceAddress::remote("db01", Some("admin"));
		let indicator = derive_remote_indicator(&resource, &table, &mut state, &mut styles);
		let span = &indicator.spans()[0];
		assert_eq!(span.text, "@");
		assert_eq!(span.style.as_deref(), Some(REMOTE_INDICATOR_STYLE));
		assert_eq!(
			span.properties.get("help").map(String::as_str),
			Some("location")
		);
	}

	#[test]
	fn test_local_resource_keeps_baseline() {
		let table = RuleTable::compile(&[
			targeting("^$", PRIMARY_LABEL_STYLE),
			targeting("^$", REMOTE_INDICATOR_STYLE),
		])
		.unwrap();
		let mut state = state();
		let mut styles = styles();
		state.enable();

		let decoration = decorate(&ResourceAddress::local(), &table, &mut state, &mut styles);
		assert_eq!(decoration.label, StyledText::plain("notes.txt"));
		assert_eq!(decoration.indicator.text(), "-");
		assert!(decoration.indicator.spans()[0].style.is_none());
		assert_eq!(styles.active_count(), 0);
	}
}
