use std::collections::HashMap;
use std::collections::HashSet;

use crate::MarksubResult;
use crate::Name;
use crate::Node;
use crate::ParseDiagnostic;
use crate::Region;
use crate::lexer::scan_markers;
use crate::name::qualify_all;
use crate::name::split_name_list;
use crate::parse_with_diagnostics;
use crate::render::Renderer;

/// Mutable render state of a [`Template`]. Created empty by
/// [`Template::process_template`] and kept until the next call to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
	pub(crate) markers: HashMap<Name, String>,
	pub(crate) subpart_overrides: HashMap<Name, String>,
	pub(crate) hidden: HashSet<Name>,
}

impl RenderState {
	/// Marker values keyed by their qualified name.
	pub fn markers(&self) -> &HashMap<Name, String> {
		&self.markers
	}

	/// Replacement content for subparts, keyed by their qualified name.
	pub fn subpart_overrides(&self) -> &HashMap<Name, String> {
		&self.subpart_overrides
	}

	/// Names of hidden subparts.
	pub fn hidden(&self) -> &HashSet<Name> {
		&self.hidden
	}
}

/// A parsed marker/subpart template together with its render state.
///
/// Subparts are regions delimited by a pair of `<!-- ###NAME### -->`
/// comments. Markers are inline `###NAME###` placeholders. Both are addressed
/// by case-insensitive names, optionally scoped with a prefix (`PREFIX_NAME`).
///
/// ```
/// use marksub_core::Template;
///
/// let mut template = Template::new(
/// 	"Hello ###NAME###!<!-- ###FOOTER### --> Bye.<!-- ###FOOTER### -->",
/// );
/// template.set_marker("name", "World", "")?;
/// assert_eq!(template.get_subpart("")?, "Hello World! Bye.");
///
/// template.hide_subparts("footer", "")?;
/// assert_eq!(template.get_subpart("")?, "Hello World!");
/// # Ok::<(), marksub_core::MarksubError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Template {
	raw: String,
	nodes: Vec<Node>,
	diagnostics: Vec<ParseDiagnostic>,
	state: RenderState,
}

impl Template {
	/// Create a template from `raw` text.
	pub fn new(raw: impl Into<String>) -> Self {
		let mut template = Self::default();
		template.process_template(raw);
		template
	}

	/// Parse `raw` into a fresh tree and reset all markers, overrides and
	/// hidden subparts. Never fails: unrecognized markup stays literal text.
	pub fn process_template(&mut self, raw: impl Into<String>) {
		let raw = raw.into();
		let (nodes, diagnostics) = parse_with_diagnostics(&raw);

		self.raw = raw;
		self.nodes = nodes;
		self.diagnostics = diagnostics;
		self.state = RenderState::default();
	}

	/// The raw text passed to the last [`process_template`](Self::process_template).
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Top-level nodes of the parsed tree.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Delimiters that could not form a region during the last parse.
	pub fn diagnostics(&self) -> &[ParseDiagnostic] {
		&self.diagnostics
	}

	pub fn state(&self) -> &RenderState {
		&self.state
	}

	/// Set the marker `PREFIX_NAME` (or `NAME` without a prefix) to `value`,
	/// replacing any previous value.
	pub fn set_marker(
		&mut self,
		name: impl AsRef<str>,
		value: impl Into<String>,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()> {
		let name = Name::qualified(name, prefix)?;
		let value = value.into();
		tracing::trace!(marker = %name, "set marker");
		self.state.markers.insert(name, value);

		Ok(())
	}

	/// The current value of a marker, or an empty string when it was never
	/// set.
	pub fn get_marker(&self, name: impl AsRef<str>, prefix: impl AsRef<str>) -> String {
		Name::qualified(name, prefix)
			.ok()
			.and_then(|name| self.state.markers.get(&name).cloned())
			.unwrap_or_default()
	}

	/// Replace the content of every subpart called `PREFIX_NAME`. The content
	/// is not parsed for nested subparts but markers in it are substituted.
	///
	/// A subpart that does not exist in the template can still be set and
	/// fetched by name.
	pub fn set_subpart(
		&mut self,
		name: impl AsRef<str>,
		content: impl Into<String>,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()> {
		let name = Name::qualified(name, prefix)?;
		let content = content.into();
		tracing::trace!(subpart = %name, "set subpart");
		self.state.subpart_overrides.insert(name, content);

		Ok(())
	}

	/// Render the subpart called `name`, or the whole template when `name` is
	/// empty.
	///
	/// With several regions of the same name the first one in document order
	/// is rendered. Unknown names render as an empty string.
	pub fn get_subpart(&self, name: impl AsRef<str>) -> MarksubResult<String> {
		let name = name.as_ref();
		if name.is_empty() {
			return Ok(self.render());
		}

		let name = Name::new(name)?;
		let renderer = Renderer::new(&self.state);

		Ok(renderer.render_subpart(&name, self.find_region(&name)))
	}

	/// Render the whole template.
	pub fn render(&self) -> String {
		Renderer::new(&self.state).render_nodes(&self.nodes)
	}

	/// Hide every subpart in the comma-separated `names`, each qualified with
	/// `prefix`. Hidden subparts render as empty strings, even when they have
	/// an override.
	pub fn hide_subparts(
		&mut self,
		names: impl AsRef<str>,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()> {
		self.hide_subparts_array(split_name_list(names.as_ref()), prefix)
	}

	/// Like [`hide_subparts`](Self::hide_subparts) with the names given as a
	/// list.
	pub fn hide_subparts_array<I, S>(
		&mut self,
		names: I,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let names = qualify_all(names, prefix.as_ref())?;
		tracing::trace!(count = names.len(), "hide subparts");
		self.state.hidden.extend(names);

		Ok(())
	}

	/// Unhide every subpart in the comma-separated `names`, except those that
	/// also appear in `permanently_hidden`. The same `prefix` applies to both
	/// lists.
	pub fn unhide_subparts(
		&mut self,
		names: impl AsRef<str>,
		permanently_hidden: impl AsRef<str>,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()> {
		self.unhide_subparts_array(
			split_name_list(names.as_ref()),
			split_name_list(permanently_hidden.as_ref()),
			prefix,
		)
	}

	/// Like [`unhide_subparts`](Self::unhide_subparts) with both name lists
	/// given as lists.
	pub fn unhide_subparts_array<I, S, P, T>(
		&mut self,
		names: I,
		permanently_hidden: P,
		prefix: impl AsRef<str>,
	) -> MarksubResult<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
		P: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		let prefix = prefix.as_ref();
		let names = qualify_all(names, prefix)?;
		let permanent: HashSet<Name> = qualify_all(permanently_hidden, prefix)?
			.into_iter()
			.collect();

		for name in names {
			if !permanent.contains(&name) {
				self.state.hidden.remove(&name);
			}
		}

		Ok(())
	}

	/// Whether `name` would render: it must not be hidden and must exist as a
	/// region or an override. Invalid names are never visible.
	pub fn is_subpart_visible(&self, name: impl AsRef<str>) -> bool {
		let Ok(name) = Name::new(name) else {
			return false;
		};

		if self.state.hidden.contains(&name) {
			return false;
		}

		self.state.subpart_overrides.contains_key(&name) || self.find_region(&name).is_some()
	}

	/// The first region called `name`, searching depth first in document
	/// order.
	pub fn find_region(&self, name: &Name) -> Option<&Region> {
		fn search<'a>(nodes: &'a [Node], name: &Name) -> Option<&'a Region> {
			nodes.iter().find_map(|node| {
				match node {
					Node::Region(region) if region.name == *name => Some(region),
					Node::Region(region) => search(&region.children, name),
					Node::Literal(_) => None,
				}
			})
		}

		search(&self.nodes, name)
	}

	/// Every region in the template, depth first in document order.
	pub fn regions(&self) -> Vec<&Region> {
		fn collect<'a>(nodes: &'a [Node], regions: &mut Vec<&'a Region>) {
			for node in nodes {
				if let Node::Region(region) = node {
					regions.push(region);
					collect(&region.children, regions);
				}
			}
		}

		let mut regions = vec![];
		collect(&self.nodes, &mut regions);
		regions
	}

	/// Distinct subpart names in the template, in document order.
	pub fn subpart_names(&self) -> Vec<Name> {
		let mut seen = HashSet::new();

		self.regions()
			.into_iter()
			.filter(|region| seen.insert(&region.name))
			.map(|region| region.name.clone())
			.collect()
	}

	/// Distinct marker names used in the template's literal text, in document
	/// order. Markers inside overrides are not included.
	pub fn marker_names(&self) -> Vec<Name> {
		fn collect(nodes: &[Node], names: &mut Vec<Name>, seen: &mut HashSet<Name>) {
			for node in nodes {
				match node {
					Node::Literal(text) => {
						for token in scan_markers(text) {
							if seen.insert(token.name.clone()) {
								names.push(token.name);
							}
						}
					}
					Node::Region(region) => collect(&region.children, names, seen),
				}
			}
		}

		let mut names = vec![];
		collect(&self.nodes, &mut names, &mut HashSet::new());
		names
	}
}
