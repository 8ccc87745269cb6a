use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use marksub_core::MarksubError;
use marksub_core::MarksubResult;
use marksub_core::Template;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render and inspect marker/subpart templates.",
	long_about = "marksub renders plain-text and HTML templates built from `###NAME###` \
	              markers and `<!-- ###NAME### -->` subparts.\n\nMarker values, subpart \
	              overrides and hidden subparts come from `marksub.toml` and from command line \
	              flags.\n\nQuick start:\n  marksub render page.html   Render a template\n  \
	              marksub list page.html     Show its subparts and markers\n  marksub check \
	              page.html    Report delimiters rendered as text"
)]
pub struct MarksubCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, used to discover `marksub.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a template and print the result.
	///
	/// Settings from the discovered (or explicit) config file are applied
	/// first. Markers and hidden subparts given on the command line are
	/// applied afterwards and take precedence.
	Render {
		/// The template file to render.
		file: PathBuf,

		/// Render only this subpart instead of the whole template.
		#[arg(long, short)]
		subpart: Option<String>,

		/// Set a marker, as `NAME=VALUE`. Can be repeated.
		#[arg(long = "marker", short)]
		markers: Vec<String>,

		/// Comma-separated list of subparts to hide.
		#[arg(long)]
		hide: Option<String>,

		/// Prefix for names given with `--marker` and `--hide`.
		#[arg(long, default_value = "")]
		prefix: String,

		/// Load settings from this config file instead of discovering one.
		#[arg(long)]
		config: Option<PathBuf>,
	},
	/// List the subparts and markers of a template.
	///
	/// Subparts are printed as a tree in document order, with the line they
	/// start on. Markers are listed once each.
	List {
		/// The template file to inspect.
		file: PathBuf,

		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Report delimiters that could not form a subpart.
	///
	/// Unpaired and overlapping delimiters are rendered as plain text, which
	/// is rarely intended. Exits with a non-zero status code when any are
	/// found.
	Check {
		/// The template file to check.
		file: PathBuf,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

/// Split a `NAME=VALUE` marker assignment. The value may contain further `=`
/// characters and may be empty.
pub fn parse_marker_assignment(input: &str) -> MarksubResult<(String, String)> {
	match input.split_once('=') {
		Some((name, value)) if !name.trim().is_empty() => {
			Ok((name.trim().to_string(), value.to_string()))
		}
		_ => Err(MarksubError::InvalidMarkerAssignment(input.to_string())),
	}
}

/// Read and parse a template file.
pub fn read_template(path: &Path) -> MarksubResult<Template> {
	let raw = std::fs::read_to_string(path)?;
	tracing::debug!(path = %path.display(), bytes = raw.len(), "read template");

	Ok(Template::new(raw))
}
