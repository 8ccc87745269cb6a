use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use marksub_cli::Commands;
use marksub_cli::MarksubCli;
use marksub_cli::OutputFormat;
use marksub_cli::parse_marker_assignment;
use marksub_cli::read_template;
use marksub_core::MarksubConfig;
use marksub_core::Node;
use marksub_core::ParseDiagnostic;
use marksub_core::Region;
use owo_colors::OwoColorize;
use owo_colors::Stream;
use owo_colors::Style;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Paint `text` with `style` when `stream` supports colors. `--no-color`
/// disables this globally through [`owo_colors::set_override`].
fn paint(text: &str, stream: Stream, style: Style) -> String {
	text.if_supports_color(stream, |text| text.style(style)).to_string()
}

fn main() {
	let args = MarksubCli::parse();

	// NO_COLOR is honored by owo-colors' terminal detection.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if args.no_color {
		owo_colors::set_override(false);
	}

	init_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render {
			file,
			subpart,
			markers,
			hide,
			prefix,
			config,
		}) => {
			let options = RenderOptions {
				subpart: subpart.as_deref(),
				markers,
				hide: hide.as_deref(),
				prefix,
				config: config.as_deref(),
			};
			run_render(&args, file, &options)
		}
		Some(Commands::List { file, format }) => run_list(file, *format),
		Some(Commands::Check { file, format }) => run_check(file, *format),
		None => {
			eprintln!("No subcommand specified. Run `marksub --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(error) = result {
		report_error(error);
		process::exit(2);
	}
}

/// Print `error` to stderr. Engine errors carry a diagnostic code and help
/// text, so they go through miette.
fn report_error(error: Box<dyn std::error::Error>) {
	match error.downcast::<marksub_core::MarksubError>() {
		Ok(error) => {
			eprintln!("{:?}", miette::Report::new(*error));
		}
		Err(error) => {
			eprintln!("{} {error}", paint("error:", Stream::Stderr, Style::new().red()));
		}
	}
}

/// Log to stderr. `MARKSUB_LOG` takes an `EnvFilter` directive and defaults
/// to `warn`; `--verbose` forces `debug`.
fn init_logging(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env("MARKSUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &MarksubCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

struct RenderOptions<'a> {
	subpart: Option<&'a str>,
	markers: &'a [String],
	hide: Option<&'a str>,
	prefix: &'a str,
	config: Option<&'a Path>,
}

fn load_config(
	args: &MarksubCli,
	explicit: Option<&Path>,
) -> Result<Option<MarksubConfig>, Box<dyn std::error::Error>> {
	if let Some(path) = explicit {
		return Ok(Some(MarksubConfig::load_from(path)?));
	}

	Ok(MarksubConfig::load(&resolve_root(args))?)
}

fn run_render(
	args: &MarksubCli,
	file: &Path,
	options: &RenderOptions<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
	// Validate assignments before touching the file system.
	let assignments = options
		.markers
		.iter()
		.map(|marker| parse_marker_assignment(marker))
		.collect::<Result<Vec<_>, _>>()?;

	let mut template = read_template(file)?;

	if let Some(config) = load_config(args, options.config)? {
		config.apply(&mut template)?;
	}

	for (name, value) in assignments {
		template.set_marker(name, value, options.prefix)?;
	}

	if let Some(hide) = options.hide {
		template.hide_subparts(hide, options.prefix)?;
	}

	let output = template.get_subpart(options.subpart.unwrap_or_default())?;
	print!("{output}");

	Ok(())
}

#[derive(Serialize)]
struct RegionEntry {
	name: String,
	occurrence: usize,
	depth: usize,
	line: usize,
	column: usize,
}

fn collect_regions(nodes: &[Node], depth: usize, entries: &mut Vec<RegionEntry>) {
	for node in nodes {
		if let Node::Region(region) = node {
			entries.push(region_entry(region, depth));
			collect_regions(&region.children, depth + 1, entries);
		}
	}
}

fn region_entry(region: &Region, depth: usize) -> RegionEntry {
	RegionEntry {
		name: region.name.to_string(),
		occurrence: region.occurrence,
		depth,
		line: region.position.start.line,
		column: region.position.start.column,
	}
}

fn run_list(file: &Path, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let template = read_template(file)?;
	let mut regions = vec![];
	collect_regions(template.nodes(), 0, &mut regions);
	let markers: Vec<String> = template
		.marker_names()
		.into_iter()
		.map(String::from)
		.collect();

	if format == OutputFormat::Json {
		let output = serde_json::json!({
			"subparts": regions,
			"markers": markers,
		});
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	if regions.is_empty() && markers.is_empty() {
		println!("No subparts or markers found.");
		return Ok(());
	}

	if !regions.is_empty() {
		println!("{}", paint("Subparts:", Stream::Stdout, Style::new().bold()));
		for entry in &regions {
			let indent = "  ".repeat(entry.depth + 1);
			let occurrence = if entry.occurrence > 0 {
				format!(" #{}", entry.occurrence + 1)
			} else {
				String::new()
			};
			println!("{indent}{}{occurrence} (line {})", entry.name, entry.line);
		}
	}

	if !markers.is_empty() {
		if !regions.is_empty() {
			println!();
		}
		println!("{}", paint("Markers:", Stream::Stdout, Style::new().bold()));
		for marker in &markers {
			println!("  {marker}");
		}
	}

	Ok(())
}

fn run_check(file: &Path, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let template = read_template(file)?;
	let diagnostics = template.diagnostics();

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"ok": diagnostics.is_empty(),
				"diagnostics": diagnostics,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text if diagnostics.is_empty() => {
			println!(
				"{} all subpart delimiters are paired.",
				paint("Check passed:", Stream::Stdout, Style::new().green())
			);
		}
		OutputFormat::Text => {
			for diagnostic in diagnostics {
				println!(
					"{} {}:{diagnostic}",
					paint("warning:", Stream::Stdout, Style::new().yellow()),
					file.display()
				);
			}
			println!();
			let delimiters: usize = diagnostics
				.iter()
				.map(ParseDiagnostic::delimiter_count)
				.sum();
			println!(
				"{} {delimiters} delimiter(s) will be rendered as text.",
				paint("Check failed:", Stream::Stdout, Style::new().red())
			);
		}
	}

	if !diagnostics.is_empty() {
		process::exit(1);
	}

	Ok(())
}
