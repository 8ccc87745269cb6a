//! Conditional shortcuts over [`Template::set_marker`] and
//! [`Template::set_subpart`]. They add no state of their own.

use crate::MarksubResult;
use crate::Name;
use crate::Template;

impl Template {
	/// Set the marker to `number` unless it is zero. Returns whether the
	/// marker was set.
	pub fn set_marker_if_not_zero(
		&mut self,
		name: impl AsRef<str>,
		number: i64,
		prefix: impl AsRef<str>,
	) -> MarksubResult<bool> {
		if number == 0 {
			return Ok(false);
		}

		self.set_marker(name, number.to_string(), prefix)?;
		Ok(true)
	}

	/// Set the marker to `value` unless it is empty. Returns whether the
	/// marker was set.
	pub fn set_marker_if_not_empty(
		&mut self,
		name: impl AsRef<str>,
		value: impl AsRef<str>,
		prefix: impl AsRef<str>,
	) -> MarksubResult<bool> {
		let value = value.as_ref();
		if value.is_empty() {
			return Ok(false);
		}

		self.set_marker(name, value, prefix)?;
		Ok(true)
	}

	/// Set the marker when `condition` holds, otherwise blank out the subpart
	/// that wraps it.
	///
	/// The wrapper subpart is named like the marker, qualified with
	/// `wrapper_prefix`: a marker `date` with wrapper prefix `wrapper` lives
	/// inside `<!-- ###WRAPPER_DATE### -->`. Blanking uses an empty subpart
	/// override, so [`is_subpart_visible`](Template::is_subpart_visible) still
	/// reports the wrapper as visible.
	///
	/// ```
	/// use marksub_core::Template;
	///
	/// let mut template = Template::new(
	/// 	"<!-- ###WRAPPER_DATE### -->Date: ###DATE###<!-- ###WRAPPER_DATE### -->",
	/// );
	/// assert!(!template.set_or_delete_marker("date", false, "today", "", "wrapper")?);
	/// assert_eq!(template.get_subpart("")?, "");
	/// # Ok::<(), marksub_core::MarksubError>(())
	/// ```
	pub fn set_or_delete_marker(
		&mut self,
		name: impl AsRef<str>,
		condition: bool,
		value: impl Into<String>,
		marker_prefix: impl AsRef<str>,
		wrapper_prefix: impl AsRef<str>,
	) -> MarksubResult<bool> {
		if condition {
			self.set_marker(name, value, marker_prefix)?;
			return Ok(true);
		}

		let wrapper = Name::qualified(name, wrapper_prefix)?;
		self.set_subpart(wrapper, "", "")?;

		Ok(false)
	}

	/// [`set_or_delete_marker`](Self::set_or_delete_marker) with the condition
	/// `number != 0`.
	pub fn set_or_delete_marker_if_not_zero(
		&mut self,
		name: impl AsRef<str>,
		number: i64,
		marker_prefix: impl AsRef<str>,
		wrapper_prefix: impl AsRef<str>,
	) -> MarksubResult<bool> {
		self.set_or_delete_marker(
			name,
			number != 0,
			number.to_string(),
			marker_prefix,
			wrapper_prefix,
		)
	}

	/// [`set_or_delete_marker`](Self::set_or_delete_marker) with the condition
	/// that `value` is not empty.
	pub fn set_or_delete_marker_if_not_empty(
		&mut self,
		name: impl AsRef<str>,
		value: impl AsRef<str>,
		marker_prefix: impl AsRef<str>,
		wrapper_prefix: impl AsRef<str>,
	) -> MarksubResult<bool> {
		let value = value.as_ref();

		self.set_or_delete_marker(
			name,
			!value.is_empty(),
			value,
			marker_prefix,
			wrapper_prefix,
		)
	}
}
