use derive_more::Deref;
use derive_more::Display;
use serde::Serialize;

use crate::MarksubError;
use crate::MarksubResult;

/// A validated marker or subpart name, always stored in uppercase.
///
/// Names consist of ASCII letters, digits and underscores. They must start
/// with a letter and must not end with an underscore. Any case is accepted on
/// construction, so `my_marker` and `MY_MARKER` are the same `Name`.
///
/// ```
/// use marksub_core::Name;
///
/// let name = Name::qualified("title", "event")?;
/// assert_eq!(name.as_str(), "EVENT_TITLE");
/// # Ok::<(), marksub_core::MarksubError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
	/// Validate `name` and store its uppercase form.
	pub fn new(name: impl AsRef<str>) -> MarksubResult<Self> {
		let upper = name.as_ref().to_ascii_uppercase();

		if is_valid_name(&upper) {
			Ok(Self(upper))
		} else {
			Err(MarksubError::InvalidName(upper))
		}
	}

	/// Compose `PREFIX_NAME`, or just `NAME` when `prefix` is empty, and
	/// validate the result.
	pub fn qualified(name: impl AsRef<str>, prefix: impl AsRef<str>) -> MarksubResult<Self> {
		let prefix = prefix.as_ref();
		let name = name.as_ref();

		if prefix.is_empty() {
			Self::new(name)
		} else {
			Self::new(format!("{prefix}_{name}"))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl AsRef<str> for Name {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<Name> for String {
	fn from(name: Name) -> Self {
		name.0
	}
}

/// Returns `true` when `name` is a legal marker or subpart name, ignoring
/// case.
pub fn is_valid_name(name: &str) -> bool {
	let bytes = name.as_bytes();
	let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
		return false;
	};

	first.is_ascii_alphabetic()
		&& *last != b'_'
		&& bytes
			.iter()
			.all(|byte| byte.is_ascii_alphanumeric() || *byte == b'_')
}

/// Split a comma-separated list of names, trimming whitespace and dropping
/// empty entries.
pub(crate) fn split_name_list(csv: &str) -> impl Iterator<Item = &str> {
	csv.split(',').map(str::trim).filter(|name| !name.is_empty())
}

/// Qualify every name with `prefix`. Fails on the first invalid name without
/// returning any of the others.
pub(crate) fn qualify_all<I, S>(names: I, prefix: &str) -> MarksubResult<Vec<Name>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	names
		.into_iter()
		.filter(|name| !name.as_ref().trim().is_empty())
		.map(|name| Name::qualified(name.as_ref().trim(), prefix))
		.collect()
}
