use std::collections::BTreeMap;
use std::fmt;

/// A run of label text with an optional style and free-form text properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
	pub text: String,

	/// Name of the style this run is drawn with.
	pub style: Option<String>,

	/// Other text properties (help text, mouse targets, ...). Restyling keeps them.
	pub properties: BTreeMap<String, String>,
}

impl Span {
	pub fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Default::default()
		}
	}

	pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			style: Some(style.into()),
			..Default::default()
		}
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}
}

/// Label markup: a sequence of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
	spans: Vec<Span>,
}

impl StyledText {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn plain(text: impl Into<String>) -> Self {
		Span::plain(text).into()
	}

	pub fn push(&mut self, span: Span) {
		self.spans.push(span);
	}

	pub fn spans(&self) -> &[Span] {
		&self.spans
	}

	/// The text content with all styling dropped.
	pub fn text(&self) -> String {
		self.spans.iter().map(|s| s.text.as_str()).collect()
	}

	/// Same text and properties, every span drawn with `style`.
	pub fn restyled(&self, style: &str) -> StyledText {
		let spans = self
			.spans
			.iter()
			.map(|span| Span {
				style: Some(style.to_string()),
				..span.clone()
			})
			.collect();
		StyledText { spans }
	}

	/// `prefix` followed by this text, unchanged.
	pub fn prefixed(&self, prefix: Span) -> StyledText {
		let mut spans = Vec::with_capacity(self.spans.len() + 1);
		spans.push(prefix);
		spans.extend(self.spans.iter().cloned());
		StyledText { spans }
	}

	/// Render spans as `[style]"text"` for display and debugging.
	pub fn markup(&self) -> String {
		self.spans
			.iter()
			.map(|span| match span.style {
				Some(ref style) => format!("[{}]{:?}", style, span.text),
				None => format!("{:?}", span.text),
			})
			.collect::<Vec<_>>()
			.join(" ")
	}
}

impl From<Span> for StyledText {
	fn from(span: Span) -> Self {
		StyledText { spans: vec![span] }
	}
}

impl From<&str> for StyledText {
	fn from(text: &str) -> Self {
		StyledText::plain(text)
	}
}

impl fmt::Display for StyledText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for span in &self.spans {
			f.write_str(&span.text)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_restyled_keeps_text_and_properties() {
		let mut text = StyledText::new();
		text.push(Span::styled("@", "mode-line").with_property("help", "Remote host"));
		text.push(Span::plain("!"));

		let restyled = text.restyled("mode-line-highlight");
		assert_eq!(restyled.text(), "@!");
		for span in restyled.spans() {
			assert_eq!(span.style.as_deref(), Some("mode-line-highlight"));
		}
		assert_eq!(
			restyled.spans()[0].properties.get("help").map(String::as_str),
			Some("Remote host")
		);
	}

	#[test]
	fn test_prefixed_and_markup() {
		let label = StyledText::plain("notes.txt").prefixed(Span::styled("web: ", "id"));
		assert_eq!(label.to_string(), "web: notes.txt");
		assert_eq!(label.markup(), r#"[id]"web: " "notes.txt""#);
	}
}
