use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MarksubError {
	#[error(transparent)]
	#[diagnostic(code(marksub::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid marker or subpart name: `{0}`")]
	#[diagnostic(
		code(marksub::invalid_name),
		help(
			"names may only contain `A-Z`, `0-9` and `_`, must not start with a digit or `_` and \
			 must not end with `_`"
		)
	)]
	InvalidName(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(marksub::config_parse),
		help("check that marksub.toml is valid TOML with [markers] and/or [subparts] tables")
	)]
	ConfigParse(String),

	#[error("invalid marker assignment: `{0}`")]
	#[diagnostic(
		code(marksub::invalid_marker_assignment),
		help("markers are assigned as `NAME=VALUE`, e.g. `--marker title=Hello`")
	)]
	InvalidMarkerAssignment(String),
}

pub type MarksubResult<T> = Result<T, MarksubError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
