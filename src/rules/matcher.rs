use crate::config::types::Rule;
use crate::error::{RemapError, Result};
use regex::Regex;

/// A compiled rule ready for matching.
#[derive(Debug)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: Rule,

	/// Compiled host pattern regex.
	pub host_regex: Option<Regex>,

	/// Compiled user pattern regex.
	pub user_regex: Option<Regex>,
}

impl CompiledRule {
	/// Compile a rule's patterns.
	pub fn compile(rule: &Rule) -> Result<Self> {
		let host_regex = rule
			.host_pattern
			.as_ref()
			.map(|p| compile_regex(p))
			.transpose()?;

		let user_regex = rule
			.user_pattern
			.as_ref()
			.map(|p| compile_regex(p))
			.transpose()?;

		Ok(CompiledRule {
			rule: rule.clone(),
			host_regex,
			user_regex,
		})
	}

	/// Check if this rule matches the given host and user.
	///
	/// Absent values are matched as the empty string.
	pub fn matches(&self, host: Option<&str>, user: Option<&str>) -> bool {
		if let Some(ref regex) = self.host_regex
			&& !regex.is_match(host.unwrap_or(""))
		{
			return false;
		}

		if let Some(ref regex) = self.user_regex
			&& !regex.is_match(user.unwrap_or(""))
		{
			return false;
		}

		true
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RemapError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Ordered table of compiled rules. Insertion order is evaluation order.
#[derive(Debug, Default)]
pub struct RuleTable {
	rules: Vec<CompiledRule>,
}

impl RuleTable {
	/// Compile every rule, failing on the first malformed pattern.
	pub fn compile(rules: &[Rule]) -> Result<Self> {
		let rules = rules
			.iter()
			.map(CompiledRule::compile)
			.collect::<Result<Vec<_>>>()?;
		Ok(RuleTable { rules })
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
		self.rules.iter()
	}

	/// All rules matching `host` and `user`, in table order.
	pub fn matching_rules<'a>(
		&'a self,
		host: Option<&'a str>,
		user: Option<&'a str>,
	) -> impl Iterator<Item = &'a CompiledRule> + 'a {
		self.rules.iter().filter(move |rule| rule.matches(host, user))
	}
}
