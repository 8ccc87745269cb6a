use std::collections::HashMap;

use crate::Name;
use crate::Node;
use crate::Region;
use crate::RenderState;
use crate::lexer::scan_resolved_markers;

/// Renders parsed nodes against a borrowed [`RenderState`]. Never mutates the
/// tree or the state.
pub(crate) struct Renderer<'a> {
	state: &'a RenderState,
}

impl<'a> Renderer<'a> {
	pub(crate) fn new(state: &'a RenderState) -> Self {
		Self { state }
	}

	pub(crate) fn render_nodes(&self, nodes: &[Node]) -> String {
		let mut output = String::new();

		for node in nodes {
			match node {
				Node::Literal(text) => output.push_str(&self.substitute_markers(text)),
				Node::Region(region) => output.push_str(&self.render_region(region)),
			}
		}

		output
	}

	pub(crate) fn render_region(&self, region: &Region) -> String {
		self.render_subpart(&region.name, Some(region))
	}

	/// Resolve a subpart by name. Hiding wins over an override, an override
	/// wins over the parsed content, and a name with neither a region nor an
	/// override renders as an empty string.
	pub(crate) fn render_subpart(&self, name: &Name, region: Option<&Region>) -> String {
		if self.state.hidden.contains(name) {
			return String::new();
		}

		if let Some(content) = self.state.subpart_overrides.get(name) {
			return self.substitute_markers(content);
		}

		region.map_or_else(String::new, |region| self.render_nodes(&region.children))
	}

	pub(crate) fn substitute_markers(&self, text: &str) -> String {
		substitute_markers(text, &self.state.markers)
	}
}

/// Replace every marker token in `text` that has a value in `markers`.
/// Markers without a value are left verbatim and do not hide a marker that
/// shares their closing `###`.
#[allow(clippy::implicit_hasher)]
pub fn substitute_markers(text: &str, markers: &HashMap<Name, String>) -> String {
	if markers.is_empty() {
		return text.to_string();
	}

	let mut output = String::with_capacity(text.len());
	let mut cursor = 0;

	for token in scan_resolved_markers(text, |name| markers.contains_key(name)) {
		let Some(value) = markers.get(&token.name) else {
			continue;
		};

		output.push_str(&text[cursor..token.start()]);
		output.push_str(value);
		cursor = token.end();
	}

	output.push_str(&text[cursor..]);
	output
}
