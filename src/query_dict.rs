//! Multi-value form payload container
//!
//! Browsers submit forms as an ordered multi-map: most fields carry one
//! value, but a group of same-named checkboxes or a multiple select carries
//! several. [`QueryDict`] models that shape with overwrite ([`QueryDict::set`])
//! and append ([`QueryDict::append`]) semantics, keyed in insertion order.

use indexmap::IndexMap;

/// Ordered mapping from field name to one-or-more submitted values.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::query_dict::QueryDict;
///
/// let mut data = QueryDict::new();
/// data.set("title", "About us");
/// data.append("tags", "a");
/// data.append("tags", "b");
///
/// assert_eq!(data.get("title"), Some("About us"));
/// assert_eq!(data.get_list("tags"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
	entries: IndexMap<String, Vec<String>>,
}

impl QueryDict {
	/// Create an empty container
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the value list for `key` with the single `value`
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.insert(key.into(), vec![value.into()]);
	}

	/// Add `value` to the value list for `key`, creating the list if absent
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.entry(key.into()).or_default().push(value.into());
	}

	/// Last value submitted for `key`, if any
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries
			.get(key)
			.and_then(|values| values.last())
			.map(String::as_str)
	}

	/// All values submitted for `key`, empty if absent
	pub fn get_list(&self, key: &str) -> &[String] {
		self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Whether any value was submitted for `key`
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of distinct field names
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the container holds no fields at all
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Field names in insertion order
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// `(name, values)` pairs in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.entries
			.iter()
			.map(|(key, values)| (key.as_str(), values.as_slice()))
	}

	/// Flatten into single-value form data, keeping the last value of any
	/// multi-value key.
	///
	/// The result has the same shape as
	/// [`nested_form_data`](crate::form_data::nested_form_data) output, so an
	/// extracted form can be asserted against a constructed payload.
	pub fn into_form_data(self) -> IndexMap<String, String> {
		self.entries
			.into_iter()
			.filter_map(|(key, mut values)| values.pop().map(|value| (key, value)))
			.collect()
	}
}

impl FromIterator<(String, String)> for QueryDict {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		let mut data = QueryDict::new();
		for (key, value) in iter {
			data.append(key, value);
		}
		data
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_overwrites_value_list() {
		let mut data = QueryDict::new();
		data.append("field", "a");
		data.append("field", "b");
		data.set("field", "c");

		assert_eq!(data.get_list("field"), ["c"]);
	}

	#[test]
	fn test_get_returns_last_value() {
		let mut data = QueryDict::new();
		data.append("field", "a");
		data.append("field", "b");

		assert_eq!(data.get("field"), Some("b"));
	}

	#[test]
	fn test_missing_key() {
		let data = QueryDict::new();

		assert_eq!(data.get("missing"), None);
		assert!(data.get_list("missing").is_empty());
		assert!(!data.contains_key("missing"));
	}

	#[test]
	fn test_keys_preserve_insertion_order() {
		let mut data = QueryDict::new();
		data.set("b", "1");
		data.set("a", "2");
		data.append("b", "3");

		let keys: Vec<&str> = data.keys().collect();
		assert_eq!(keys, ["b", "a"]);
	}

	#[test]
	fn test_into_form_data_keeps_last_value() {
		let mut data = QueryDict::new();
		data.set("title", "About");
		data.append("tags", "a");
		data.append("tags", "b");

		let flat = data.into_form_data();

		assert_eq!(flat["title"], "About");
		assert_eq!(flat["tags"], "b");
		assert_eq!(flat.len(), 2);
	}

	#[test]
	fn test_from_iterator_appends() {
		let data: QueryDict = vec![
			("tags".to_string(), "a".to_string()),
			("tags".to_string(), "b".to_string()),
		]
		.into_iter()
		.collect();

		assert_eq!(data.get_list("tags"), ["a", "b"]);
	}
}
