use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MarksubError;
use crate::MarksubResult;
use crate::Template;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["marksub.toml", ".marksub.toml", ".config/marksub.toml"];

/// Render settings loaded from a `marksub.toml` file.
///
/// ```toml
/// prefix = "EVENT"
/// hide = ["DETAILS", "REGISTRATION"]
/// unhide = ["REGISTRATION"]
/// keep_hidden = ["SECRET"]
///
/// [markers]
/// title = "Rust Conference"
/// places = "42"
///
/// [subparts]
/// footer = "See you there!"
/// ```
///
/// Every name is qualified with `prefix` when one is set.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MarksubConfig {
	/// Prefix applied to every marker, subpart and hidden name.
	#[serde(default)]
	pub prefix: String,
	/// Marker values keyed by name.
	#[serde(default)]
	pub markers: BTreeMap<String, String>,
	/// Subpart overrides keyed by name.
	#[serde(default)]
	pub subparts: BTreeMap<String, String>,
	/// Subparts to hide.
	#[serde(default)]
	pub hide: Vec<String>,
	/// Subparts to unhide again after `hide` has been applied.
	#[serde(default)]
	pub unhide: Vec<String>,
	/// Subparts that stay hidden even when listed in `unhide`.
	#[serde(default)]
	pub keep_hidden: Vec<String>,
}

impl MarksubConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> MarksubResult<Option<MarksubConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit file path.
	pub fn load_from(path: &Path) -> MarksubResult<MarksubConfig> {
		let content = std::fs::read_to_string(path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %path.display(), "loaded config");

		Ok(config)
	}

	/// Parse config from TOML text.
	pub fn parse(content: &str) -> MarksubResult<MarksubConfig> {
		toml::from_str(content).map_err(|e| MarksubError::ConfigParse(e.to_string()))
	}

	/// Apply markers, subpart overrides, then hidden and unhidden subparts.
	pub fn apply(&self, template: &mut Template) -> MarksubResult<()> {
		for (name, value) in &self.markers {
			template.set_marker(name, value.as_str(), &self.prefix)?;
		}

		for (name, content) in &self.subparts {
			template.set_subpart(name, content.as_str(), &self.prefix)?;
		}

		template.hide_subparts_array(&self.hide, &self.prefix)?;
		template.unhide_subparts_array(&self.unhide, &self.keep_hidden, &self.prefix)?;

		// `keep_hidden` always wins, even for names that were never in `hide`.
		template.hide_subparts_array(&self.keep_hidden, &self.prefix)?;

		Ok(())
	}
}
